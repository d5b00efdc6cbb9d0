//! Start Menu shortcut management.
//!
//! Provides functionality for:
//! - Building the `wslg.exe` launch description for an application entry
//! - Writing `.lnk` files through the native shortcut format
//! - Listing and removing shortcuts in a distribution's Start Menu folder
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wsl_shortcuts_core::shortcut::{LnkShortcutWriter, ShortcutManager};
//!
//! let manager = ShortcutManager::new(config.clone(), Arc::new(LnkShortcutWriter));
//! let report = manager.create(&distro, &[entry])?;
//! println!("Created {} shortcut(s)", report.succeeded);
//! ```

mod launch;
mod manager;
mod writer;

pub use launch::LaunchSpec;
pub use manager::{BatchReport, ItemError, ListOutcome, ShortcutManager};
pub use writer::{LnkShortcutWriter, ShortcutWriter};
