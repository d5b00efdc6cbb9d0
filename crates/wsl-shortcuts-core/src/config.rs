//! Centralized configuration for WSL Shortcut Creator.
//!
//! [`Config`] is built once at startup and shared read-only (usually behind an
//! `Arc`) by every component. Constant tables that never vary per install live
//! in the unit structs below.

use crate::error::Result;
use crate::platform;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Application-level constants.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "WSL Shortcut Creator";
    pub const ICON_CACHE_DIR_NAME: &'static str = "WSL Shortcuts";
    pub const ICONS_DIR_NAME: &'static str = "icons";
}

/// Subsystem executables and launch conventions.
pub struct WslConfig;

impl WslConfig {
    pub const WSL_EXECUTABLE: &'static str = "wsl.exe";
    pub const WSLG_EXECUTABLE: &'static str = r"C:\Program Files\WSL\wslg.exe";
    pub const DEFAULT_ICON: &'static str = r"C:\Program Files\WSL\wslg.exe,0";
    pub const WORKING_DIRECTORY: &'static str = "%USERPROFILE%";
    pub const LINUX_SHELL: &'static str = "/bin/bash";
    pub const MANIFEST_HINT_VAR: &'static str = "BAMF_DESKTOP_FILE_HINT";
    pub const DEFAULT_MARKER: char = '*';
}

/// Desktop manifest conventions inside the Linux filesystem.
pub struct ManifestConfig;

impl ManifestConfig {
    pub const EXTENSION: &'static str = "desktop";
    pub const NAME_KEY: &'static str = "Name=";
    pub const SEARCH_PATTERNS: [&'static str; 3] = [
        "/usr/share/applications/*.desktop",
        "/var/lib/snapd/desktop/applications/*.desktop",
        "~/.local/share/applications/*.desktop",
    ];
}

/// Shortcut and icon file conventions on the host.
pub struct ShortcutConfig;

impl ShortcutConfig {
    pub const EXTENSION: &'static str = "lnk";
    pub const DESCRIPTION_PREFIX: &'static str = "WSL GUI Application: ";
}

/// Icon conversion parameters.
pub struct IconConfig;

impl IconConfig {
    pub const EXTENSION: &'static str = "ico";
    pub const SIZES: [u32; 5] = [16, 32, 48, 64, 128];
}

/// How manifest display names are read during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    /// One subsystem call per manifest.
    #[default]
    PerManifest,
    /// One subsystem call per search location, emitting `path<TAB>name` lines.
    Batched,
}

/// Immutable runtime configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub app_name: String,
    /// Start Menu "Programs" directory; distro folders are created below it.
    pub shortcuts_root: PathBuf,
    /// Destination for converted `.ico` files.
    pub icon_cache_dir: PathBuf,
    pub wsl_executable: String,
    pub wslg_executable: String,
    pub default_icon: String,
    pub working_directory: String,
    pub linux_shell: String,
    pub search_patterns: Vec<String>,
    pub manifest_extension: String,
    pub name_key: String,
    pub shortcut_extension: String,
    pub icon_extension: String,
    pub manifest_hint_var: String,
    pub description_prefix: String,
    pub discovery_mode: DiscoveryMode,
    /// Forces the Start Menu folder name instead of deriving it from the distro.
    pub folder_override: Option<String>,
}

impl Config {
    /// Create a builder with all defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve the default configuration against the current user's directories.
    pub fn from_environment() -> Result<Self> {
        Self::builder().build()
    }

    /// Directory holding the shortcuts for a given Start Menu folder name.
    pub fn shortcut_dir(&self, folder_name: &str) -> PathBuf {
        self.shortcuts_root.join(folder_name)
    }
}

/// Builder for [`Config`].
///
/// Directory fields left unset are resolved from the host at `build()` time.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    shortcuts_root: Option<PathBuf>,
    icon_cache_dir: Option<PathBuf>,
    wsl_executable: Option<String>,
    wslg_executable: Option<String>,
    search_patterns: Option<Vec<String>>,
    discovery_mode: DiscoveryMode,
    folder_override: Option<String>,
}

impl ConfigBuilder {
    pub fn shortcuts_root(mut self, path: impl AsRef<Path>) -> Self {
        self.shortcuts_root = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn icon_cache_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.icon_cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn wsl_executable(mut self, exe: impl Into<String>) -> Self {
        self.wsl_executable = Some(exe.into());
        self
    }

    pub fn wslg_executable(mut self, exe: impl Into<String>) -> Self {
        self.wslg_executable = Some(exe.into());
        self
    }

    /// Replace the manifest glob patterns searched inside the distribution.
    pub fn search_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn discovery_mode(mut self, mode: DiscoveryMode) -> Self {
        self.discovery_mode = mode;
        self
    }

    pub fn folder_override(mut self, folder: Option<String>) -> Self {
        self.folder_override = folder.filter(|f| !f.trim().is_empty());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<Config> {
        let shortcuts_root = match self.shortcuts_root {
            Some(path) => path,
            None => platform::start_menu_programs_dir()?,
        };
        let icon_cache_dir = match self.icon_cache_dir {
            Some(path) => path,
            None => platform::icon_cache_dir()?,
        };

        Ok(Config {
            app_name: AppConfig::APP_NAME.to_string(),
            shortcuts_root,
            icon_cache_dir,
            wsl_executable: self
                .wsl_executable
                .unwrap_or_else(|| WslConfig::WSL_EXECUTABLE.to_string()),
            wslg_executable: self
                .wslg_executable
                .unwrap_or_else(|| WslConfig::WSLG_EXECUTABLE.to_string()),
            default_icon: WslConfig::DEFAULT_ICON.to_string(),
            working_directory: WslConfig::WORKING_DIRECTORY.to_string(),
            linux_shell: WslConfig::LINUX_SHELL.to_string(),
            search_patterns: self.search_patterns.unwrap_or_else(|| {
                ManifestConfig::SEARCH_PATTERNS
                    .iter()
                    .map(|p| p.to_string())
                    .collect()
            }),
            manifest_extension: ManifestConfig::EXTENSION.to_string(),
            name_key: ManifestConfig::NAME_KEY.to_string(),
            shortcut_extension: ShortcutConfig::EXTENSION.to_string(),
            icon_extension: IconConfig::EXTENSION.to_string(),
            manifest_hint_var: WslConfig::MANIFEST_HINT_VAR.to_string(),
            description_prefix: ShortcutConfig::DESCRIPTION_PREFIX.to_string(),
            discovery_mode: self.discovery_mode,
            folder_override: self.folder_override,
        })
    }
}
