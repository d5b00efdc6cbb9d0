//! WSL Shortcuts Core - Headless library for turning WSL GUI applications
//! into Windows Start Menu shortcuts.
//!
//! The library detects the default WSL distribution, discovers the desktop
//! manifests installed inside it, converts custom icons to multi-resolution
//! `.ico` files and manages the `.lnk` files in the distribution's Start Menu
//! folder. Every subsystem call goes through [`platform::CommandRunner`] and
//! every shortcut write through [`shortcut::ShortcutWriter`], so front-ends
//! and tests can substitute either.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wsl_shortcuts_core::{Config, LnkShortcutWriter, Session, SystemCommandRunner};
//!
//! #[tokio::main]
//! async fn main() -> wsl_shortcuts_core::Result<()> {
//!     let config = Arc::new(Config::from_environment()?);
//!     let session = Session::start(
//!         config,
//!         Arc::new(SystemCommandRunner),
//!         Arc::new(LnkShortcutWriter),
//!     )
//!     .await;
//!
//!     let report = session.discover().await?;
//!     println!("Found {} applications", report.count());
//!
//!     let created = session.create(report.entries).await?;
//!     println!("Created {} shortcuts", created.succeeded);
//!     Ok(())
//! }
//! ```

pub mod cancel;
pub mod config;
pub mod custom;
pub mod discovery;
pub mod distro;
pub mod entry;
pub mod error;
pub mod icon;
pub mod notice;
pub mod platform;
pub mod session;
pub mod shortcut;

// Re-export commonly used types
pub use cancel::CancellationToken;
pub use config::{Config, ConfigBuilder, DiscoveryMode};
pub use custom::{CustomAppRegistrar, SubmitOutcome};
pub use discovery::{AppDiscovery, DiscoveryReport};
pub use distro::{DistroInfo, DistroResolver, FixedFolderNaming, FolderNaming, IdentityFolderNaming};
pub use entry::{ApplicationEntry, EntrySource};
pub use error::{Result, ShortcutError};
pub use icon::IconConverter;
pub use notice::{Notice, NoticeLevel};
pub use platform::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use session::Session;
pub use shortcut::{
    BatchReport, ItemError, LaunchSpec, ListOutcome, LnkShortcutWriter, ShortcutManager,
    ShortcutWriter,
};
