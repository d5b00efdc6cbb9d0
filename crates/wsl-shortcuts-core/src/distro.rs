//! Default WSL distribution detection.
//!
//! `wsl.exe -l -v` prints a header followed by one row per installed
//! distribution; the default one is marked with `*`:
//!
//! ```text
//!   NAME            STATE           VERSION
//! * Ubuntu-22.04    Running         2
//!   Debian          Stopped         2
//! ```

use crate::config::{Config, WslConfig};
use crate::error::{Result, ShortcutError};
use crate::platform::process::describe_command;
use crate::platform::CommandRunner;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The resolved default distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistroInfo {
    /// Distribution name as passed to `wsl -d`.
    pub name: String,
    /// Start Menu subfolder holding this distribution's shortcuts.
    pub shortcut_folder: String,
}

impl DistroInfo {
    /// Full path of the shortcut folder for this distribution.
    pub fn shortcut_dir(&self, config: &Config) -> PathBuf {
        config.shortcut_dir(&self.shortcut_folder)
    }
}

/// Maps a distribution name to its Start Menu folder name.
pub trait FolderNaming: Send + Sync {
    fn folder_for(&self, distro: &str) -> String;
}

/// Uses the distribution name itself as the folder name.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFolderNaming;

impl FolderNaming for IdentityFolderNaming {
    fn folder_for(&self, distro: &str) -> String {
        distro.to_string()
    }
}

/// Always returns the same folder, regardless of the distribution.
#[derive(Debug, Clone)]
pub struct FixedFolderNaming(pub String);

impl FolderNaming for FixedFolderNaming {
    fn folder_for(&self, _distro: &str) -> String {
        self.0.clone()
    }
}

/// Extract the default distribution name from a `wsl -l -v` listing.
///
/// The first non-blank line is the header and is ignored. Returns `None` when
/// no remaining line carries the default marker.
pub fn parse_default_distro(listing: &str) -> Option<String> {
    listing
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .find(|line| line.contains(WslConfig::DEFAULT_MARKER))
        .and_then(|line| {
            line.replace(WslConfig::DEFAULT_MARKER, " ")
                .split_whitespace()
                .next()
                .map(str::to_string)
        })
}

/// Resolves the default distribution through the subsystem manager.
pub struct DistroResolver {
    config: Arc<Config>,
    runner: Arc<dyn CommandRunner>,
    naming: Box<dyn FolderNaming>,
}

impl DistroResolver {
    /// Create a resolver whose folder naming follows the configuration.
    pub fn new(config: Arc<Config>, runner: Arc<dyn CommandRunner>) -> Self {
        let naming: Box<dyn FolderNaming> = match &config.folder_override {
            Some(folder) => Box::new(FixedFolderNaming(folder.clone())),
            None => Box::new(IdentityFolderNaming),
        };
        Self {
            config,
            runner,
            naming,
        }
    }

    /// Replace the folder naming strategy.
    pub fn with_folder_naming(mut self, naming: impl FolderNaming + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// Query the subsystem for its default distribution.
    pub fn resolve(&self) -> Result<DistroInfo> {
        let args = vec!["-l".to_string(), "-v".to_string()];
        let command = describe_command(&self.config.wsl_executable, &args);

        let output = self
            .runner
            .run(&self.config.wsl_executable, &args)?
            .into_checked(&command)?;

        let listing = output.stdout_wide();
        debug!("WSL list output:\n{}", listing);

        let Some(name) = parse_default_distro(&listing) else {
            warn!("No default WSL distribution in listing");
            return Err(ShortcutError::environment("No default WSL distribution found"));
        };

        let shortcut_folder = self.naming.folder_for(&name);
        info!("Detected distribution: {} (folder: {})", name, shortcut_folder);

        Ok(DistroInfo {
            name,
            shortcut_folder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::CommandOutput;
    use tempfile::TempDir;

    struct FixedRunner(CommandOutput);

    impl CommandRunner for FixedRunner {
        fn run(&self, _program: &str, _args: &[String]) -> Result<CommandOutput> {
            Ok(self.0.clone())
        }
    }

    fn config(dir: &TempDir, folder_override: Option<&str>) -> Arc<Config> {
        Arc::new(
            Config::builder()
                .shortcuts_root(dir.path())
                .icon_cache_dir(dir.path())
                .folder_override(folder_override.map(str::to_string))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_parse_marked_line() {
        let listing = "  NAME            STATE           VERSION\n\
                       * Ubuntu-22.04    Running         2\n  \
                       Debian          Stopped         2\n";
        assert_eq!(parse_default_distro(listing).as_deref(), Some("Ubuntu-22.04"));
    }

    #[test]
    fn test_parse_marker_not_first() {
        let listing = "  NAME      STATE     VERSION\r\n\r\n  Debian    Stopped   2\r\n* Arch      Running   2\r\n";
        assert_eq!(parse_default_distro(listing).as_deref(), Some("Arch"));
    }

    #[test]
    fn test_parse_marker_without_space() {
        let listing = "NAME STATE VERSION\n*kali-linux Stopped 2\n";
        assert_eq!(parse_default_distro(listing).as_deref(), Some("kali-linux"));
    }

    #[test]
    fn test_parse_no_marker() {
        let listing = "  NAME      STATE     VERSION\n  Debian    Stopped   2\n";
        assert_eq!(parse_default_distro(listing), None);
    }

    #[test]
    fn test_parse_empty_and_header_only() {
        assert_eq!(parse_default_distro(""), None);
        assert_eq!(parse_default_distro("* NAME STATE VERSION\n"), None);
    }

    #[test]
    fn test_resolve_identity_folder() {
        let dir = TempDir::new().unwrap();
        let runner = Arc::new(FixedRunner(CommandOutput::ok(
            "  NAME STATE VERSION\n* Ubuntu Running 2\n",
        )));
        let resolver = DistroResolver::new(config(&dir, None), runner);

        let info = resolver.resolve().unwrap();
        assert_eq!(info.name, "Ubuntu");
        assert_eq!(info.shortcut_folder, "Ubuntu");
    }

    #[test]
    fn test_resolve_with_override() {
        let dir = TempDir::new().unwrap();
        let runner = Arc::new(FixedRunner(CommandOutput::ok(
            "  NAME STATE VERSION\n* Ubuntu Running 2\n",
        )));
        let resolver = DistroResolver::new(config(&dir, Some("Ubuntu on Windows")), runner);

        let info = resolver.resolve().unwrap();
        assert_eq!(info.name, "Ubuntu");
        assert_eq!(info.shortcut_folder, "Ubuntu on Windows");
        assert_eq!(
            info.shortcut_dir(&config(&dir, None)),
            dir.path().join("Ubuntu on Windows")
        );
    }

    #[test]
    fn test_resolve_custom_naming() {
        struct Upper;
        impl FolderNaming for Upper {
            fn folder_for(&self, distro: &str) -> String {
                distro.to_uppercase()
            }
        }

        let dir = TempDir::new().unwrap();
        let runner = Arc::new(FixedRunner(CommandOutput::ok("NAME\n* debian Stopped 2\n")));
        let resolver = DistroResolver::new(config(&dir, None), runner).with_folder_naming(Upper);

        assert_eq!(resolver.resolve().unwrap().shortcut_folder, "DEBIAN");
    }

    #[test]
    fn test_resolve_failures() {
        let dir = TempDir::new().unwrap();

        let no_default = DistroResolver::new(
            config(&dir, None),
            Arc::new(FixedRunner(CommandOutput::ok("NAME STATE\n  Debian Stopped\n"))),
        );
        assert!(no_default.resolve().unwrap_err().is_environment());

        let failing = DistroResolver::new(
            config(&dir, None),
            Arc::new(FixedRunner(CommandOutput::failed(
                -1,
                "Windows Subsystem for Linux has no installed distributions.",
            ))),
        );
        assert!(failing.resolve().unwrap_err().is_environment());
    }
}
