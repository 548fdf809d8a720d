//! Libraries on the local search path.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::resolver::Resolver;

/// A named entry inside a library file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    library: PathBuf,
    name: String,
}

impl Resource {
    pub fn new(library: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            name: name.into(),
        }
    }

    /// The library file holding this resource.
    pub fn library(&self) -> &Path {
        &self.library
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the whole resource.
    pub fn read(&self) -> Result<Vec<u8>> {
        let mut archive = open_archive(&self.library)?;
        let read_failed = |source| Error::ReadResource {
            name: self.name.clone(),
            library: self.library.clone(),
            source,
        };

        let mut file = archive.by_name(&self.name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::ResourceNotFound(self.name.clone()),
            zip::result::ZipError::Io(source) => read_failed(source),
            source => Error::InvalidLibrary {
                path: self.library.clone(),
                source,
            },
        })?;

        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(read_failed)?;
        Ok(data)
    }
}

/// Entry names of one library file, read once.
#[derive(Clone, Debug)]
pub struct ArchiveIndex {
    path: PathBuf,
    entries: BTreeSet<String>,
}

impl ArchiveIndex {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let archive = open_archive(&path)?;
        let entries = archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect();
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resource(&self, name: &str) -> Option<Resource> {
        self.contains(name).then(|| Resource::new(&self.path, name))
    }
}

fn open_archive(path: &Path) -> Result<zip::ZipArchive<BufReader<File>>> {
    let file = File::open(path).map_err(|e| Error::OpenLibrary {
        path: path.to_path_buf(),
        source: e,
    })?;
    zip::ZipArchive::new(BufReader::new(file)).map_err(|e| Error::InvalidLibrary {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Extracted library files, in search order.
///
/// A library that cannot be indexed stays on the search path but provides no
/// resources.
#[derive(Clone, Debug, Default)]
pub struct LibraryPath {
    paths: Vec<PathBuf>,
    indexes: Vec<ArchiveIndex>,
}

impl LibraryPath {
    pub fn new<I, P>(libraries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut paths = Vec::new();
        let mut indexes = Vec::new();

        for path in libraries {
            let path = path.into();
            match ArchiveIndex::open(&path) {
                Ok(index) => {
                    debug!("indexed '{}' ({} entries)", path.display(), index.len());
                    indexes.push(index);
                }
                Err(e) => warn!("library '{}' contributes no resources: {}", path.display(), e),
            }
            paths.push(path);
        }

        Self { paths, indexes }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Resolver for LibraryPath {
    fn resource(&self, name: &str) -> Option<Resource> {
        self.indexes.iter().find_map(|index| index.resource(name))
    }
}
