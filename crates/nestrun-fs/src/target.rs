use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use crate::{Error, Result};

/// A private, timestamp-named directory under the shared temp root.
///
/// Two instances started in the same millisecond compute the same name; the
/// second one fails with [`Error::AlreadyExists`] rather than sharing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetDir {
    path: PathBuf,
    created_at: u64,
    active: bool,
}

impl TargetDir {
    /// Create `<root>/<prefix><now in millis>`.
    pub fn create(root: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        Self::create_at(root, prefix, now_millis())
    }

    /// Create `<root>/<prefix><millis>`.
    pub fn create_at(root: impl AsRef<Path>, prefix: &str, millis: u64) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|e| Error::CreateRoot {
            path: root.to_path_buf(),
            source: e,
        })?;

        let path = root.join(dir_name(prefix, millis));
        fs::create_dir(&path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::AlreadyExists(path.clone()),
            _ => Error::Create {
                path: path.clone(),
                source: e,
            },
        })?;

        info!("[create] {}", path.display());
        Ok(Self {
            path,
            created_at: millis,
            active: true,
        })
    }

    /// Recognize a directory left behind by another process.
    ///
    /// Returns `None` unless the file name is `prefix` followed by digits.
    pub fn from_existing(path: impl Into<PathBuf>, prefix: &str) -> Option<Self> {
        let path = path.into();
        let created_at = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| parse_timestamp(name, prefix))?;
        Some(Self {
            path,
            created_at,
            active: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn created_at_millis(&self) -> u64 {
        self.created_at
    }

    pub fn created_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.created_at)
    }

    /// True only for the directory this process created.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn delete(&self) -> DeleteReport {
        delete(&self.path)
    }
}

/// Directory name for a given prefix and creation time.
pub fn dir_name(prefix: &str, millis: u64) -> String {
    format!("{prefix}{millis}")
}

/// Creation time encoded in a target directory name.
pub fn parse_timestamp(name: &str, prefix: &str) -> Option<u64> {
    let digits = name.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Outcome of a best-effort delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Files and directories removed below the root.
    pub removed: usize,
    /// Paths that could not be removed.
    pub failed: Vec<PathBuf>,
    /// Whether the root itself is gone.
    pub root_removed: bool,
}

impl DeleteReport {
    pub fn is_complete(&self) -> bool {
        self.root_removed && self.failed.is_empty()
    }
}

/// Remove `dir` and everything below it.
///
/// Never fails: every path that cannot be removed is logged and recorded in
/// the report, and the walk continues with its siblings.
pub fn delete(dir: impl AsRef<Path>) -> DeleteReport {
    let dir = dir.as_ref();
    let mut report = DeleteReport::default();

    remove_children(dir, &mut report);

    report.root_removed = match fs::remove_dir(dir) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!("failed to remove '{}': {}", dir.display(), e);
            report.failed.push(dir.to_path_buf());
            false
        }
    };

    if report.root_removed {
        info!("[delete] {} deleted", dir.display());
    } else {
        info!("[delete] {} NOT deleted", dir.display());
    }
    report
}

fn remove_children(dir: &Path, report: &mut DeleteReport) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return,
        Err(e) => {
            warn!("failed to list '{}': {}", dir.display(), e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("failed to read entry in '{}': {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        // file_type does not follow symlinks, so a link to a directory is removed as a file
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        let removed = if is_dir {
            remove_children(&path, report);
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };

        match removed {
            Ok(()) => report.removed += 1,
            Err(e) => {
                warn!("failed to remove '{}': {}", path.display(), e);
                report.failed.push(path);
            }
        }
    }
}
