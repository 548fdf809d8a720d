//! The running archive and the nested packages inside it.
//!
//! # Architecture
//!
//! - `locate.rs` - Finding the packaged archive from a code location
//! - `manifest.rs` - Descriptor attributes
//! - `entry.rs` - Entry classification
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `extract/` - Streaming selected entries to disk

pub use entry::{ArchiveEntry, EntryKind, NATIVE_LIBRARY_EXTENSIONS, classify};
pub use error::{Error, Result};
pub use extract::{EntrySource, Extracted, ExtractedEntry, ZipSource, extract};
pub use locate::{CodeLocation, PackagedArchive, locate};
pub use manifest::{DELEGATED_MAIN_CLASS, MANIFEST_PATH, Manifest, TRAY_ICON_PROVIDER_CLASS};
pub use sanitize::resolve_entry_path;

pub mod entry;
mod error;
pub mod extract;
mod locate;
pub mod manifest;
mod sanitize;
