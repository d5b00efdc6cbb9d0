//! Error types for WSL Shortcut Creator.
//!
//! The variants follow the failure classes the front-end distinguishes:
//! environment problems (no subsystem, no default distribution), validation
//! of user input, and I/O while touching the shortcut folder or icon cache.
//! Batch operations never fail as a whole because of a single item; they
//! return a [`BatchReport`](crate::shortcut::BatchReport) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the shortcut library.
#[derive(Debug, Error)]
pub enum ShortcutError {
    // Environment errors
    #[error("Environment error: {message}")]
    Environment { message: String },

    #[error("Command `{command}` failed with status {status:?}: {stderr}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    // Validation errors
    #[error("Missing required field(s): {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Icon conversion failed for {path}: {message}")]
    IconConversion { path: PathBuf, message: String },

    #[error("Failed to write shortcut {path}: {message}")]
    ShortcutWrite { path: PathBuf, message: String },

    #[error("Shortcut not found: {0}")]
    NotFound(PathBuf),

    // Scheduling errors
    #[error("Another {operation} operation is already running")]
    Busy { operation: String },

    #[error("Operation was cancelled")]
    Cancelled,

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

impl From<std::io::Error> for ShortcutError {
    fn from(err: std::io::Error) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl ShortcutError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an environment error.
    pub fn environment(message: impl Into<String>) -> Self {
        ShortcutError::Environment {
            message: message.into(),
        }
    }

    /// True when the error means the subsystem is unusable.
    ///
    /// Front-ends render this as a disabled state rather than a transient failure.
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            ShortcutError::Environment { .. } | ShortcutError::CommandFailed { .. }
        )
    }

    /// True for errors caused by user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, ShortcutError::Validation { .. })
    }
}
