//! Resolution context for code launched out of an archive.
//!
//! # Architecture
//!
//! Resolution is a chain of [`Resolver`]s. The local layer is the
//! [`LibraryPath`] of extracted libraries; the fallback is the [`Baseline`],
//! which holds the launcher's compiled-in [`Registry`] and the outer archive's
//! own resources. A [`ResolutionContext`] chains the two.
//!
//! Libraries carry data, not code: entry points and tray icon providers always
//! come from the registry, resources come from whichever layer has them first.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nestrun_loader::{Baseline, Invocation, LibraryPath, Registry, ResolutionContext, Resolver};
//!
//! fn app(invocation: &Invocation) -> anyhow::Result<()> {
//!     println!("{:?}", invocation.args());
//!     Ok(())
//! }
//!
//! let registry = Registry::new().with_entry_point("com.example.App", app);
//! let context = ResolutionContext::new(LibraryPath::default(), Baseline::new(registry));
//! assert!(context.entry_point("com.example.App").is_some());
//!
//! let context = Arc::new(context);
//! let _active = context.enter();
//! assert!(nestrun_loader::current().is_some());
//! ```

pub use context::{ContextGuard, ResolutionContext, current, spawn};
pub use entry::{EntryPoint, Invocation};
pub use error::{Error, Result};
pub use library::{ArchiveIndex, LibraryPath, Resource};
pub use registry::{Baseline, Registry};
pub use resolver::{PairResolver, Resolver};
pub use tray::{TrayIcon, TrayIconProvider};

mod context;
mod entry;
mod error;
mod library;
mod registry;
mod resolver;
mod tray;
