//! Manual registration of applications discovery cannot see.

use crate::entry::ApplicationEntry;
use crate::error::{Result, ShortcutError};
use crate::icon::IconConverter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a custom application submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub entry: ApplicationEntry,
    /// Set when an icon was supplied but could not be converted; the entry is
    /// still created, without a custom icon.
    pub icon_warning: Option<String>,
}

/// Builds custom entries, converting icons through the shared converter.
pub struct CustomAppRegistrar {
    converter: IconConverter,
}

impl CustomAppRegistrar {
    pub fn new(converter: IconConverter) -> Self {
        Self { converter }
    }

    /// Validate and register a custom application.
    ///
    /// `name` and `invocation` are trimmed; if either is empty the call fails
    /// with [`ShortcutError::Validation`] naming every missing field.
    pub fn submit(
        &self,
        name: &str,
        invocation: &str,
        icon_image: Option<&Path>,
    ) -> Result<SubmitOutcome> {
        let name = name.trim();
        let invocation = invocation.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name".to_string());
        }
        if invocation.is_empty() {
            missing.push("command".to_string());
        }
        if !missing.is_empty() {
            return Err(ShortcutError::Validation { fields: missing });
        }

        let (icon_path, icon_warning) = match icon_image {
            Some(path) => self.convert_icon(path),
            None => (None, None),
        };

        info!("Custom application '{}' added", name);
        Ok(SubmitOutcome {
            entry: ApplicationEntry::custom(name, invocation, icon_path),
            icon_warning,
        })
    }

    fn convert_icon(&self, path: &Path) -> (Option<PathBuf>, Option<String>) {
        match self.converter.convert(path) {
            Ok(icon) => (Some(icon), None),
            Err(e) => {
                warn!("Error converting image: {}", e);
                (None, Some(format!("Error converting image: {}", e)))
            }
        }
    }
}
