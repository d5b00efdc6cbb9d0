//! Launch description for WSLg shortcuts.

use crate::config::Config;
use crate::distro::DistroInfo;
use crate::entry::ApplicationEntry;
use serde::Serialize;

/// Everything a shortcut needs to start an application through WSLg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSpec {
    /// Executable the shortcut points at (`wslg.exe`).
    pub target: String,
    /// Command line passed to the target.
    pub arguments: String,
    pub working_directory: String,
    /// File providing the shortcut icon.
    pub icon_path: String,
    /// Resource index inside `icon_path`.
    pub icon_index: i32,
    pub description: String,
}

impl LaunchSpec {
    /// Build the launch description of `entry` for `distro`.
    ///
    /// Manifest entries are started as
    /// `-d <distro> --cd "~" -- env <HINT>=<manifest> <token>` so the desktop
    /// shell associates the window with its manifest; custom entries pass their
    /// command verbatim after `--`.
    pub fn for_entry(config: &Config, distro: &DistroInfo, entry: &ApplicationEntry) -> Self {
        let invocation = entry.invocation.trim();
        let command = if entry.is_manifest(&config.manifest_extension) {
            format!(
                "env {}={} {}",
                config.manifest_hint_var,
                invocation,
                entry.app_token()
            )
        } else {
            invocation.to_string()
        };

        let (icon_path, icon_index) = match &entry.icon_path {
            Some(path) => (path.display().to_string(), 0),
            None => split_icon_location(&config.default_icon),
        };

        Self {
            target: config.wslg_executable.clone(),
            arguments: format!("-d {} --cd \"~\" -- {}", distro.name, command),
            working_directory: config.working_directory.clone(),
            icon_path,
            icon_index,
            description: format!("{}{}", config.description_prefix, entry.display_name.trim()),
        }
    }

    /// Icon reference in `path,index` form.
    pub fn icon_location(&self) -> String {
        format!("{},{}", self.icon_path, self.icon_index)
    }
}

/// Split `C:\path\file.exe,3` into path and resource index.
///
/// A missing or non-numeric suffix means index 0.
fn split_icon_location(location: &str) -> (String, i32) {
    match location.rsplit_once(',') {
        Some((path, index)) => match index.trim().parse::<i32>() {
            Ok(index) => (path.to_string(), index),
            Err(_) => (location.to_string(), 0),
        },
        None => (location.to_string(), 0),
    }
}
