//! Platform helpers for the launcher.
//!
//! - `os.rs` - Operating system family and its cleanup behavior
//! - `dir.rs` - Shared temp root lookup

pub use os::OS;

pub mod dir;
pub mod os;
