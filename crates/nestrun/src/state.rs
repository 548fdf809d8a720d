//! Everything one launch owns, built step by step.

use std::path::Path;
use std::sync::Arc;

use nestrun_archive::{Extracted, Manifest, PackagedArchive, locate};
use nestrun_fs::{TargetDir, reap_stale};
use nestrun_loader::{ArchiveIndex, Baseline, LibraryPath, Registry, ResolutionContext};
use tracing::{info, warn};

use crate::cleanup::{CleanupGuard, CleanupHandle};
use crate::config::LauncherConfig;
use crate::error::Result;

/// State of a single launch.
///
/// Created once per run by [`LauncherState::prepare`] and passed explicitly
/// through extraction, context construction and invocation. Dropping it
/// deletes the target directory.
#[derive(Debug)]
pub struct LauncherState {
    // dropped before `cleanup` so nothing still holds the libraries open
    context: Option<Arc<ResolutionContext>>,
    extracted: Option<Extracted>,
    archive: PackagedArchive,
    cleanup: CleanupGuard,
}

impl LauncherState {
    /// Locate the archive, reap leftovers, create the target directory and
    /// register its cleanup.
    pub fn prepare(config: &LauncherConfig) -> Result<Self> {
        let archive = locate(&config.code_location()?)?;
        let root = config.shared_temp_root();

        if config.reap_policy().should_reap(nestrun_platform::os::detect()) {
            let reaped = reap_stale(&root, config.dir_prefix(), None);
            if !reaped.removed.is_empty() {
                info!("reaped {} stale target directories", reaped.removed.len());
            }
        }

        let target = TargetDir::create(&root, config.dir_prefix())?;
        let cleanup = CleanupGuard::register(target);
        if config.signals_enabled() {
            cleanup.on_signal();
        }

        Ok(Self {
            context: None,
            extracted: None,
            archive,
            cleanup,
        })
    }

    /// Write the nested packages into the target directory.
    pub fn extract(&mut self) -> Result<&Extracted> {
        let extracted = self.archive.extract_to(self.cleanup.path())?;
        info!(
            "extracted {} entries ({} bytes) to '{}'",
            extracted.len(),
            extracted.total_bytes,
            self.cleanup.path().display()
        );
        Ok(&*self.extracted.insert(extracted))
    }

    /// Build the resolution context over the extracted libraries.
    ///
    /// Must follow [`LauncherState::extract`]; before it the search path is
    /// empty.
    pub fn build_context(&mut self, registry: Registry) -> Arc<ResolutionContext> {
        let libraries = match &self.extracted {
            Some(extracted) => LibraryPath::new(extracted.libraries()),
            None => {
                warn!("building a resolution context before extraction");
                LibraryPath::default()
            }
        };

        let mut baseline = Baseline::new(registry);
        match ArchiveIndex::open(self.archive.path()) {
            Ok(index) => baseline = baseline.with_archive(index),
            Err(e) => warn!("outer archive contributes no resources: {}", e),
        }

        let context = Arc::new(ResolutionContext::new(libraries, baseline));
        self.context = Some(Arc::clone(&context));
        context
    }

    pub fn manifest(&self) -> &Manifest {
        self.archive.manifest()
    }

    pub fn archive(&self) -> &PackagedArchive {
        &self.archive
    }

    pub fn extracted(&self) -> Option<&Extracted> {
        self.extracted.as_ref()
    }

    pub fn context(&self) -> Option<&Arc<ResolutionContext>> {
        self.context.as_ref()
    }

    /// The private directory of this run.
    pub fn target_dir(&self) -> &Path {
        self.cleanup.path()
    }

    pub fn cleanup_handle(&self) -> Arc<CleanupHandle> {
        self.cleanup.handle()
    }
}
