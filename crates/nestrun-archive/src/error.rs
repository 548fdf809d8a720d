use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("this application isn't packaged as an archive: '{0}'")]
    NotPackaged(PathBuf),

    #[error("failed to determine the running executable: {0}")]
    CurrentExe(#[source] io::Error),

    #[error("failed to read archive '{path}': {source}")]
    ArchiveRead { path: PathBuf, source: io::Error },

    #[error("invalid archive '{path}': {source}")]
    InvalidArchive {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("failed to read descriptor of '{path}': {source}")]
    Descriptor { path: PathBuf, source: io::Error },

    #[error("failed to extract '{entry}': {source}")]
    Extraction { entry: String, source: io::Error },

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: String, resolved: PathBuf },
}

impl Error {
    /// Whether the archive itself or its descriptor could not be read.
    pub fn is_archive_read(&self) -> bool {
        matches!(
            self,
            Self::ArchiveRead { .. } | Self::InvalidArchive { .. } | Self::Descriptor { .. }
        )
    }

    /// The entry an extraction failure is about.
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::Extraction { entry, .. } | Self::ZipSlip { entry, .. } => Some(entry),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
