//! High-level shortcut management.
//!
//! The shortcut folder is the source of truth: nothing about existing
//! shortcuts is cached between calls. Creating a shortcut whose file name
//! already exists replaces it, so re-running creation never accumulates
//! duplicates.

use super::launch::LaunchSpec;
use super::writer::ShortcutWriter;
use crate::config::Config;
use crate::distro::DistroInfo;
use crate::entry::ApplicationEntry;
use crate::error::{Result, ShortcutError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A failed item inside a batch operation.
#[derive(Debug, Clone, Serialize)]
pub struct ItemError<T> {
    pub item: T,
    pub cause: String,
}

/// Tally of a batch operation where each item is attempted independently.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport<T> {
    /// Number of items that succeeded.
    pub succeeded: usize,
    pub errors: Vec<ItemError<T>>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            succeeded: 0,
            errors: Vec::new(),
        }
    }
}

impl<T> BatchReport<T> {
    pub fn is_complete_success(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, item: T, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(e) => self.errors.push(ItemError {
                item,
                cause: e.to_string(),
            }),
        }
    }
}

/// Result of listing a shortcut folder.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutcome {
    pub folder: PathBuf,
    /// Shortcut file names, sorted.
    pub files: Vec<String>,
    /// True when the folder did not exist and was created by this call.
    pub folder_created: bool,
}

/// Lists, creates and removes shortcuts for a distribution.
pub struct ShortcutManager {
    config: Arc<Config>,
    writer: Arc<dyn ShortcutWriter>,
}

impl ShortcutManager {
    pub fn new(config: Arc<Config>, writer: Arc<dyn ShortcutWriter>) -> Self {
        Self { config, writer }
    }

    /// Path the shortcut for `entry` is written to.
    pub fn shortcut_path(&self, distro: &DistroInfo, entry: &ApplicationEntry) -> PathBuf {
        distro
            .shortcut_dir(&self.config)
            .join(entry.shortcut_file_name(&self.config.shortcut_extension))
    }

    /// Launch description that `create` would write for `entry`.
    pub fn preview(&self, distro: &DistroInfo, entry: &ApplicationEntry) -> LaunchSpec {
        LaunchSpec::for_entry(&self.config, distro, entry)
    }

    /// List shortcut files directly inside the distribution's folder.
    ///
    /// A missing folder is created and reported through `folder_created`.
    pub fn list(&self, distro: &DistroInfo) -> Result<ListOutcome> {
        let folder = distro.shortcut_dir(&self.config);
        debug!("Looking for shortcuts in: {}", folder.display());

        if !folder.exists() {
            info!("Shortcuts folder not found at: {}", folder.display());
            fs::create_dir_all(&folder).map_err(|e| ShortcutError::io_with_path(e, &folder))?;
            info!("Created shortcuts directory: {}", folder.display());
            return Ok(ListOutcome {
                folder,
                files: Vec::new(),
                folder_created: true,
            });
        }

        let read_dir = fs::read_dir(&folder).map_err(|e| ShortcutError::io_with_path(e, &folder))?;
        let mut files = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| ShortcutError::io_with_path(e, &folder))?;
            let path = dir_entry.path();
            if path.is_file() && self.has_shortcut_extension(&path) {
                files.push(dir_entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();

        info!("Found {} shortcut(s) in {}", files.len(), folder.display());
        Ok(ListOutcome {
            folder,
            files,
            folder_created: false,
        })
    }

    /// Remove shortcut files by name; each removal is attempted independently.
    pub fn remove(&self, distro: &DistroInfo, filenames: &[String]) -> BatchReport<String> {
        let folder = distro.shortcut_dir(&self.config);
        let mut report = BatchReport::default();

        for name in filenames {
            let outcome = self.remove_one(&folder, name);
            if let Err(e) = &outcome {
                warn!("Failed to remove shortcut {}: {}", name, e);
            }
            report.record(name.clone(), outcome);
        }

        info!(
            "Removed {} shortcut(s), {} failed",
            report.succeeded,
            report.errors.len()
        );
        report
    }

    fn remove_one(&self, folder: &Path, name: &str) -> Result<()> {
        if !is_plain_file_name(name) || !self.has_shortcut_extension(Path::new(name)) {
            return Err(ShortcutError::Other(format!(
                "Invalid shortcut name: {}",
                name
            )));
        }

        let path = folder.join(name);
        if !path.is_file() {
            return Err(ShortcutError::NotFound(path));
        }

        fs::remove_file(&path).map_err(|e| ShortcutError::io_with_path(e, &path))?;
        debug!("Removed shortcut: {}", path.display());
        Ok(())
    }

    /// Create one shortcut per entry; each entry is attempted independently.
    ///
    /// Fails as a whole only when the shortcut folder cannot be created.
    pub fn create(
        &self,
        distro: &DistroInfo,
        entries: &[ApplicationEntry],
    ) -> Result<BatchReport<ApplicationEntry>> {
        let folder = distro.shortcut_dir(&self.config);
        fs::create_dir_all(&folder).map_err(|e| ShortcutError::io_with_path(e, &folder))?;

        let mut report = BatchReport::default();
        for entry in entries {
            let outcome = self.create_one(distro, entry);
            if let Err(e) = &outcome {
                warn!("Failed to create shortcut for {}: {}", entry.display_name, e);
            }
            report.record(entry.clone(), outcome);
        }

        info!(
            "Created {} shortcut(s), {} failed",
            report.succeeded,
            report.errors.len()
        );
        Ok(report)
    }

    fn create_one(&self, distro: &DistroInfo, entry: &ApplicationEntry) -> Result<()> {
        entry.validate()?;
        // A stem that sanitises away would produce a bare `.lnk` that `list` never shows.
        if entry.shortcut_stem().is_empty() {
            return Err(ShortcutError::Validation {
                fields: vec!["name".to_string()],
            });
        }

        let spec = LaunchSpec::for_entry(&self.config, distro, entry);
        let dest = self.shortcut_path(distro, entry);
        debug!("Creating {} with arguments: {}", dest.display(), spec.arguments);

        self.writer.write(&spec, &dest)
    }

    fn has_shortcut_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                ext.to_string_lossy()
                    .eq_ignore_ascii_case(&self.config.shortcut_extension)
            })
            .unwrap_or(false)
    }
}

/// A bare file name: no separators, not `.` or `..`.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':'])
}
