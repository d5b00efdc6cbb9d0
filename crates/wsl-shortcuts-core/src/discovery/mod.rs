//! Discovery of GUI applications installed inside the distribution.
//!
//! Scans the well-known desktop manifest locations through `wsl --` and turns
//! every manifest carrying a display name into an [`ApplicationEntry`].
//! Entries keep the scan order: search location first, then glob order.
//!
//! [`ApplicationEntry`]: crate::entry::ApplicationEntry

mod manifest;
mod scanner;

pub use manifest::{extract_display_name, parse_batched_listing};
pub use scanner::{AppDiscovery, DiscoveryReport};
