//! User-facing status messages.
//!
//! Front-ends show one notice per completed action. Errors get a distinct
//! level so they can be styled differently from success.

use crate::custom::SubmitOutcome;
use crate::discovery::DiscoveryReport;
use crate::entry::ApplicationEntry;
use crate::error::ShortcutError;
use crate::shortcut::{BatchReport, ListOutcome};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A status line for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    /// Shown while no distribution is available.
    pub fn no_distro() -> Self {
        Self::error("No WSL distribution detected")
    }

    pub fn from_list(outcome: &ListOutcome) -> Self {
        if outcome.folder_created {
            Self::info("Created shortcuts folder - ready to add shortcuts")
        } else if outcome.files.is_empty() {
            Self::info("No shortcuts found")
        } else {
            Self::info(format!("Found {}", counted(outcome.files.len(), "shortcut")))
        }
    }

    pub fn from_discovery(report: &DiscoveryReport) -> Self {
        match report.warning() {
            Some(warning) => Self::warning(warning),
            None => Self::info(format!(
                "Found {}",
                counted(report.count(), "WSL application")
            )),
        }
    }

    pub fn from_submit(outcome: &SubmitOutcome) -> Self {
        match &outcome.icon_warning {
            Some(warning) => Self::warning(format!(
                "Custom application '{}' added without icon: {}",
                outcome.entry.display_name, warning
            )),
            None => Self::info(format!(
                "Custom application '{}' added successfully",
                outcome.entry.display_name
            )),
        }
    }

    pub fn from_create(report: &BatchReport<ApplicationEntry>) -> Self {
        match report.errors.as_slice() {
            [] => Self::info("Shortcut(s) created successfully."),
            errors => {
                let failed: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.item.display_name, e.cause))
                    .collect();
                Self::error(format!(
                    "Created {}, {} failed. Error creating shortcut: {}",
                    counted(report.succeeded, "shortcut"),
                    errors.len(),
                    failed.join("; ")
                ))
            }
        }
    }

    pub fn from_remove(report: &BatchReport<String>) -> Self {
        match report.errors.as_slice() {
            [] => Self::info(format!(
                "Successfully removed {}",
                counted(report.succeeded, "shortcut")
            )),
            errors => {
                let failed: Vec<String> = errors
                    .iter()
                    .map(|e| format!("Error removing {}: {}", e.item, e.cause))
                    .collect();
                Self::error(format!(
                    "Removed {}, {} failed. {}",
                    counted(report.succeeded, "shortcut"),
                    errors.len(),
                    failed.join("; ")
                ))
            }
        }
    }

    pub fn from_error(err: &ShortcutError) -> Self {
        match err {
            ShortcutError::Validation { .. } => {
                Self::error("Application name and command are required")
            }
            ShortcutError::Environment { message } => {
                Self::error(format!("Error detecting WSL distribution: {}", message))
            }
            other => Self::error(other.to_string()),
        }
    }
}

/// `1 shortcut`, `2 shortcuts`.
fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
