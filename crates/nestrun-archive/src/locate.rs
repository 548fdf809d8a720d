use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::extract::{Extracted, ZipSource, extract};
use crate::manifest::{MANIFEST_PATH, Manifest};

/// A path known to hold the running code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeLocation(PathBuf);

impl CodeLocation {
    /// The running executable.
    pub fn current() -> Result<Self> {
        std::env::current_exe().map(Self).map_err(Error::CurrentExe)
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Find the archive that holds `location`.
///
/// Loose files (a directory, or nothing at all) are not an archive.
pub fn locate(location: &CodeLocation) -> Result<PackagedArchive> {
    let path = location.path();
    match path.metadata() {
        Ok(meta) if meta.is_dir() => Err(Error::NotPackaged(path.to_path_buf())),
        Ok(_) => PackagedArchive::open(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::NotPackaged(path.to_path_buf())),
        Err(e) => Err(Error::ArchiveRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// The running archive with its descriptor already read.
#[derive(Clone, Debug)]
pub struct PackagedArchive {
    path: PathBuf,
    manifest: Manifest,
}

impl PackagedArchive {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| Error::ArchiveRead {
            path: path.clone(),
            source: e,
        })?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(|e| Error::InvalidArchive {
            path: path.clone(),
            source: e,
        })?;

        let manifest = read_manifest(&mut archive, &path)?;
        debug!(
            "opened archive '{}' ({} entries, {} descriptor attributes)",
            path.display(),
            archive.len(),
            manifest.attributes().count()
        );

        Ok(Self { path, manifest })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// A fresh pass over the archive's entries.
    pub fn source(&self) -> Result<ZipSource<BufReader<File>>> {
        ZipSource::open(&self.path)
    }

    pub fn extract_to(&self, destination: impl AsRef<Path>) -> Result<Extracted> {
        let mut source = self.source()?;
        extract(&mut source, destination)
    }
}

fn read_manifest<R: Read + io::Seek>(archive: &mut zip::ZipArchive<R>, path: &Path) -> Result<Manifest> {
    let mut file = match archive.by_name(MANIFEST_PATH) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(Manifest::default()),
        Err(ZipError::Io(e)) => {
            return Err(Error::Descriptor {
                path: path.to_path_buf(),
                source: e,
            });
        }
        Err(e) => {
            return Err(Error::InvalidArchive {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|e| Error::Descriptor {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Manifest::parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn directory_is_not_packaged() {
        let dir = tempdir().unwrap();
        let err = locate(&CodeLocation::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::NotPackaged(_)));
    }

    #[test]
    fn missing_path_is_not_packaged() {
        let dir = tempdir().unwrap();
        let err = locate(&CodeLocation::new(dir.path().join("gone.jar"))).unwrap_err();
        assert!(matches!(err, Error::NotPackaged(_)));
    }

    #[test]
    fn plain_file_is_unreadable_archive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app");
        std::fs::write(&path, b"not a zip at all").unwrap();

        let err = locate(&CodeLocation::new(&path)).unwrap_err();

        assert!(matches!(err, Error::InvalidArchive { .. }));
        assert!(err.is_archive_read());
    }

    #[test]
    fn reads_descriptor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.jar");
        write_archive(
            &path,
            &[
                (MANIFEST_PATH, "Manifest-Version: 1.0\ndelegatedMainClass: com.example.App\n"),
                ("lib/a.jar", "a"),
            ],
        );

        let archive = locate(&CodeLocation::new(&path)).unwrap();

        assert_eq!(archive.path(), path);
        assert_eq!(archive.manifest().delegated_main_class(), Some("com.example.App"));
    }

    #[test]
    fn missing_descriptor_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.jar");
        write_archive(&path, &[("lib/a.jar", "a")]);

        let archive = PackagedArchive::open(&path).unwrap();

        assert!(archive.manifest().is_empty());
    }

    #[test]
    fn extract_to_writes_nested_packages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.jar");
        write_archive(&path, &[("lib/a.jar", "a"), ("App.class", "x")]);
        let target = dir.path().join("out");

        let extracted = PackagedArchive::open(&path).unwrap().extract_to(&target).unwrap();

        assert_eq!(extracted.len(), 1);
        assert_eq!(std::fs::read(target.join("lib/a.jar")).unwrap(), b"a");
    }
}
