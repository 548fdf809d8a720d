//! The isolated resolution context and the thread's active context.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::entry::EntryPoint;
use crate::error::{Error, Result};
use crate::library::{LibraryPath, Resource};
use crate::registry::Baseline;
use crate::resolver::{PairResolver, Resolver};
use crate::tray::TrayIconProvider;

/// Extracted libraries first, then the baseline.
///
/// Built once per run after extraction and never changed afterwards.
#[derive(Debug)]
pub struct ResolutionContext {
    chain: PairResolver<LibraryPath, Baseline>,
}

impl ResolutionContext {
    pub fn new(libraries: LibraryPath, baseline: Baseline) -> Self {
        Self {
            chain: PairResolver::new(libraries, baseline),
        }
    }

    /// The local search path, in lookup order.
    pub fn search_path(&self) -> &[PathBuf] {
        self.chain.primary().paths()
    }

    pub fn baseline(&self) -> &Baseline {
        self.chain.fallback()
    }

    /// Read a resource through the chain.
    pub fn read_resource(&self, name: &str) -> Result<Vec<u8>> {
        self.resource(name)
            .ok_or_else(|| Error::ResourceNotFound(name.to_string()))?
            .read()
    }

    /// Make `self` the calling thread's active context until the guard drops.
    pub fn enter(self: &Arc<Self>) -> ContextGuard {
        let previous = CURRENT.with(|current| current.replace(Some(Arc::clone(self))));
        ContextGuard { previous }
    }
}

impl Resolver for ResolutionContext {
    fn entry_point(&self, name: &str) -> Option<Arc<dyn EntryPoint>> {
        self.chain.entry_point(name)
    }

    fn tray_provider(&self, name: &str) -> Option<Arc<dyn TrayIconProvider>> {
        self.chain.tray_provider(name)
    }

    fn resource(&self, name: &str) -> Option<Resource> {
        self.chain.resource(name)
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Arc<ResolutionContext>>> = const { RefCell::new(None) };
}

/// The calling thread's active context, if any.
///
/// Threads do not inherit it: a thread started with [`std::thread::spawn`]
/// sees `None`. Start threads with [`spawn`], or hand them
/// [`Invocation::context`](crate::Invocation::context) and [`enter`] it there.
///
/// [`enter`]: ResolutionContext::enter
pub fn current() -> Option<Arc<ResolutionContext>> {
    CURRENT.with(|current| current.borrow().clone())
}

/// Spawn a thread that runs `f` with the caller's active context.
pub fn spawn<F, T>(f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let context = current();
    thread::spawn(move || {
        let _guard = context.as_ref().map(ResolutionContext::enter);
        f()
    })
}

/// Restores the previously active context on drop.
#[must_use = "the context is only active while the guard lives"]
#[derive(Debug)]
pub struct ContextGuard {
    previous: Option<Arc<ResolutionContext>>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}
