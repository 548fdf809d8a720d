//! Streaming nested packages out of the archive.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::sanitize::resolve_entry_path;

mod zip;

pub use self::zip::ZipSource;

/// Archive-specific entry source.
pub trait EntrySource {
    /// Next entry in the archive's own enumeration order.
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>>;
}

/// An entry written to the target directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub name: String,
    pub kind: EntryKind,
    pub path: PathBuf,
    pub size: u64,
}

/// Extraction results, in extraction order.
#[derive(Clone, Debug, Default)]
pub struct Extracted {
    pub entries: Vec<ExtractedEntry>,
    pub total_bytes: u64,
}

impl Extracted {
    /// Extracted library files, in extraction order.
    pub fn libraries(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(|entry| entry.kind.is_library())
            .map(|entry| entry.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write every library, web bundle and native library entry under
/// `destination`, keeping its relative path.
///
/// The first failing entry aborts the whole extraction. Entries whose names
/// resolve to the same file are only written the first time.
pub fn extract<S: EntrySource>(source: &mut S, destination: impl AsRef<Path>) -> Result<Extracted> {
    let destination = destination.as_ref();
    let mut seen = HashSet::new();
    let mut extracted = Extracted::default();

    while let Some(entry) = source.next_entry() {
        let mut entry = entry?;
        if !entry.kind.is_extracted() {
            continue;
        }

        let target = resolve_entry_path(destination, &entry.name)?;
        if !seen.insert(target.clone()) {
            warn!("skipping duplicate entry '{}'", entry.name);
            continue;
        }

        let size = write_entry(&mut entry, &target)?;
        debug!("extracted {} '{}' ({} bytes)", entry.kind, entry.name, size);

        extracted.total_bytes += size;
        extracted.entries.push(ExtractedEntry {
            name: entry.name,
            kind: entry.kind,
            path: target,
            size,
        });
    }

    Ok(extracted)
}

fn write_entry(entry: &mut ArchiveEntry<'_>, target: &Path) -> Result<u64> {
    let failed = |source: io::Error| Error::Extraction {
        entry: entry.name.clone(),
        source,
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(failed)?;
    }

    let mut file = File::create(target).map_err(failed)?;
    let copied = io::copy(&mut entry.reader, &mut file).and_then(|n| file.sync_all().map(|()| n));

    match copied {
        Ok(n) => Ok(n),
        Err(e) => {
            drop(file);
            // never leave a truncated copy behind
            let _ = fs::remove_file(target);
            Err(failed(e))
        }
    }
}
