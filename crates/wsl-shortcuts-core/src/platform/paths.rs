//! Platform-specific path utilities.
//!
//! This module provides functions to get the host paths for:
//! - The per-user Start Menu "Programs" directory
//! - The converted icon cache
//! - The user profile used as shortcut working directory

use crate::config::AppConfig;
use crate::error::{Result, ShortcutError};
use std::path::PathBuf;

/// Get the per-user Start Menu programs directory.
///
/// # Platform Behavior
/// - **Windows**: `%APPDATA%\Microsoft\Windows\Start Menu\Programs`
/// - **Other**: the same layout below the platform data directory, so the
///   crate can be exercised off Windows
pub fn start_menu_programs_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ShortcutError::environment("Could not determine app data directory"))?;
    Ok(data_dir
        .join("Microsoft")
        .join("Windows")
        .join("Start Menu")
        .join("Programs"))
}

/// Get the directory holding converted shortcut icons.
///
/// # Platform Behavior
/// - **Windows**: `%LOCALAPPDATA%\WSL Shortcuts\icons`
/// - **Linux**: `~/.local/share/WSL Shortcuts/icons`
pub fn icon_cache_dir() -> Result<PathBuf> {
    let local = dirs::data_local_dir().ok_or_else(|| {
        ShortcutError::environment("Could not determine local app data directory")
    })?;
    Ok(local
        .join(AppConfig::ICON_CACHE_DIR_NAME)
        .join(AppConfig::ICONS_DIR_NAME))
}

/// Get the current user's profile directory.
pub fn user_profile_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| ShortcutError::environment("Could not determine home directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_menu_layout() {
        if let Ok(dir) = start_menu_programs_dir() {
            assert!(dir.ends_with("Microsoft/Windows/Start Menu/Programs"));
        }
    }

    #[test]
    fn test_icon_cache_layout() {
        if let Ok(dir) = icon_cache_dir() {
            assert!(dir.ends_with("WSL Shortcuts/icons"));
        }
    }
}
