use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use crate::entry::{ArchiveEntry, classify};
use crate::error::{Error, Result};
use crate::extract::EntrySource;

/// Entries of a ZIP container in central-directory order.
pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    path: PathBuf,
    index: usize,
}

impl ZipSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::ArchiveRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::new(BufReader::new(file), path)
    }
}

impl<R: Read + Seek> ZipSource<R> {
    /// `path` only labels errors.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let archive = zip::ZipArchive::new(reader).map_err(|e| Error::InvalidArchive {
            path: path.clone(),
            source: e,
        })?;
        Ok(Self {
            archive,
            path,
            index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    /// Only entries that [`classify`] marks for extraction are yielded; the
    /// rest are never opened, so an unreadable entry that is skipped anyway
    /// cannot fail the extraction.
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        let (index, name) = loop {
            let index = self.index;
            let name = self.archive.name_for_index(index)?;
            self.index += 1;
            if classify(name).is_extracted() {
                break (index, name.to_string());
            }
        };

        match self.archive.by_index(index) {
            Ok(file) => {
                let size = file.size();
                Some(Ok(ArchiveEntry::new(name, size, Box::new(file))))
            }
            Err(e) => Some(Err(Error::Extraction {
                entry: name,
                source: io::Error::from(e),
            })),
        }
    }
}
