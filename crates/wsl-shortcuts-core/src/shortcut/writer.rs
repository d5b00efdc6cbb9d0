//! Shortcut file writers.

use super::launch::LaunchSpec;
use crate::error::{Result, ShortcutError};
use std::path::Path;

/// Writes a launch description to a shortcut file.
///
/// Implementations must replace an existing file at `dest`.
pub trait ShortcutWriter: Send + Sync {
    fn write(&self, spec: &LaunchSpec, dest: &Path) -> Result<()>;
}

/// Suffix of the in-progress link file; never the shortcut extension, so
/// listings ignore it.
#[cfg(any(windows, test))]
const TEMP_SUFFIX: &str = ".tmp";

/// Native `.lnk` writer.
///
/// The link is saved to a temporary file in the destination folder and then
/// renamed over `dest`, so a failed write never leaves a partial shortcut and
/// the temporary file is removed on every error path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LnkShortcutWriter;

impl ShortcutWriter for LnkShortcutWriter {
    #[cfg(windows)]
    fn write(&self, spec: &LaunchSpec, dest: &Path) -> Result<()> {
        use tracing::debug;

        let write_error = |message: String| ShortcutError::ShortcutWrite {
            path: dest.to_path_buf(),
            message,
        };

        let folder = dest
            .parent()
            .ok_or_else(|| write_error("shortcut path has no parent folder".to_string()))?;

        let mut link = mslnk::ShellLink::new(&spec.target)
            .map_err(|e| write_error(format!("target {}: {:?}", spec.target, e)))?;
        link.set_arguments(Some(spec.arguments.clone()));
        link.set_working_dir(Some(spec.working_directory.clone()));
        link.set_icon_location(Some(spec.icon_path.clone()));
        link.header_mut().set_icon_index(spec.icon_index);
        link.set_name(Some(spec.description.clone()));

        let temp = tempfile::Builder::new()
            .prefix(".wsl-shortcut-")
            .suffix(TEMP_SUFFIX)
            .tempfile_in(folder)
            .map_err(|e| ShortcutError::io_with_path(e, folder))?;

        link.create_lnk(temp.path())
            .map_err(|e| write_error(e.to_string()))?;
        temp.persist(dest)
            .map_err(|e| ShortcutError::io_with_path(e.error, dest))?;

        debug!("Wrote shortcut to {:?}", dest);
        Ok(())
    }

    #[cfg(not(windows))]
    fn write(&self, _spec: &LaunchSpec, dest: &Path) -> Result<()> {
        Err(ShortcutError::ShortcutWrite {
            path: dest.to_path_buf(),
            message: "shortcut files can only be written on Windows".to_string(),
        })
    }
}
