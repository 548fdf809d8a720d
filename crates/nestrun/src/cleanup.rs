//! Deleting the target directory on every way out of the process.

use std::path::Path;
use std::sync::{Arc, Mutex, Once, PoisonError};

use nestrun_fs::{DeleteReport, TargetDir};
use tracing::{debug, warn};

/// Exit status after SIGINT/SIGTERM.
pub const SIGNAL_EXIT_CODE: i32 = 130;

/// Deletes one target directory, at most once.
#[derive(Debug)]
pub struct CleanupHandle {
    target: TargetDir,
    done: Mutex<bool>,
}

impl CleanupHandle {
    pub fn new(target: TargetDir) -> Self {
        Self {
            target,
            done: Mutex::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        self.target.path()
    }

    /// Delete the directory. Every call after the first returns `None`, but
    /// only once the first call has finished deleting.
    pub fn run(&self) -> Option<DeleteReport> {
        let mut done = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        if *done {
            return None;
        }
        *done = true;

        let report = self.target.delete();
        if !report.is_complete() {
            warn!(
                "'{}' only partially deleted, {} path(s) remain",
                self.target.path().display(),
                report.failed.len()
            );
        }
        Some(report)
    }

    /// Whether a run has finished deleting.
    pub fn has_run(&self) -> bool {
        *self.done.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs the cleanup when dropped, including during a panic.
#[must_use = "the target directory is deleted as soon as the guard drops"]
#[derive(Debug)]
pub struct CleanupGuard {
    handle: Arc<CleanupHandle>,
}

impl CleanupGuard {
    pub fn register(target: TargetDir) -> Self {
        debug!("registered cleanup of '{}'", target.path().display());
        Self {
            handle: Arc::new(CleanupHandle::new(target)),
        }
    }

    pub fn handle(&self) -> Arc<CleanupHandle> {
        Arc::clone(&self.handle)
    }

    pub fn path(&self) -> &Path {
        self.handle.path()
    }

    /// Also run the cleanup on SIGINT/SIGTERM, then exit with
    /// [`SIGNAL_EXIT_CODE`].
    ///
    /// The process-wide handler is installed on first use; later guards take
    /// over the slot. Failure to install is logged and leaves the other exit
    /// paths in place.
    pub fn on_signal(&self) {
        *signal_slot() = Some(self.handle());

        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            if let Err(e) = ctrlc::set_handler(cleanup_and_exit) {
                warn!("no cleanup on termination signals: {}", e);
            }
        });
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        // a signal arriving meanwhile waits in `run` for the deletion to finish
        self.handle.run();

        let mut slot = signal_slot();
        if slot.as_ref().is_some_and(|h| Arc::ptr_eq(h, &self.handle)) {
            *slot = None;
        }
    }
}

static SIGNAL_TARGET: Mutex<Option<Arc<CleanupHandle>>> = Mutex::new(None);

fn signal_slot() -> std::sync::MutexGuard<'static, Option<Arc<CleanupHandle>>> {
    SIGNAL_TARGET.lock().unwrap_or_else(PoisonError::into_inner)
}

fn cleanup_and_exit() {
    let handle = signal_slot().take();
    if let Some(handle) = handle {
        handle.run();
    }
    std::process::exit(SIGNAL_EXIT_CODE);
}
