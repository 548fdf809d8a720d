//! Lifecycle of the private directory extracted packages live in.
//!
//! - `target.rs` - Timestamp-named creation and best-effort recursive deletion
//! - `reap.rs` - Collection of directories left behind by earlier runs

pub use error::{Error, Result};
pub use reap::{ReapReport, reap_stale, scan_stale};
pub use target::{DeleteReport, TargetDir, delete, dir_name, parse_timestamp};

mod error;
mod reap;
mod target;

/// Prefix every target directory name starts with.
pub const DEFAULT_PREFIX: &str = "_nestrun-";
