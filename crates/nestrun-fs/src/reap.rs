use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::target::TargetDir;

/// Outcome of a stale-directory sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReapReport {
    /// Directories that are gone after the sweep.
    pub removed: Vec<PathBuf>,
    /// Directories left for a later run.
    pub left: Vec<PathBuf>,
}

/// Target directories under `root` not owned by this process.
///
/// `current` is excluded even if it matches. An unreadable root yields
/// nothing.
pub fn scan_stale(root: impl AsRef<Path>, prefix: &str, current: Option<&Path>) -> Vec<TargetDir> {
    let root = root.as_ref();
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("skipping stale scan of '{}': {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut stale: Vec<TargetDir> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| TargetDir::from_existing(entry.path(), prefix))
        .filter(|dir| current != Some(dir.path()))
        .collect();
    stale.sort_by_key(|dir| dir.created_at_millis());
    stale
}

/// Delete every stale target directory under `root`.
///
/// Failures are tolerated: the directory stays and the next run retries.
pub fn reap_stale(root: impl AsRef<Path>, prefix: &str, current: Option<&Path>) -> ReapReport {
    let mut report = ReapReport::default();

    for dir in scan_stale(root, prefix, current) {
        let deleted = dir.delete();
        if deleted.root_removed {
            report.removed.push(dir.path().to_path_buf());
        } else {
            warn!("leaving stale directory '{}' for a later run", dir.path().display());
            report.left.push(dir.path().to_path_buf());
        }
    }

    report
}
