//! Platform abstraction layer.
//!
//! All host-specific code lives here so the rest of the crate stays portable:
//! - `paths` - Start Menu, icon cache and profile directories
//! - `process` - Running subsystem commands and decoding their output
//!
//! # Supported Platforms
//!
//! - **Windows**: Full support (the only host where WSL exists)
//! - **Linux/macOS**: Builds and runs with injected runners, used for tests

pub mod paths;
pub mod process;

pub use paths::{icon_cache_dir, start_menu_programs_dir, user_profile_dir};
pub use process::{decode_wide_output, CommandOutput, CommandRunner, SystemCommandRunner};
