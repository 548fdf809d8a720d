//! Error types for resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open library '{path}': {source}")]
    OpenLibrary { path: PathBuf, source: io::Error },

    #[error("invalid library '{path}': {source}")]
    InvalidLibrary {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("resource '{0}' not found")]
    ResourceNotFound(String),

    #[error("failed to read resource '{name}' from '{library}': {source}")]
    ReadResource {
        name: String,
        library: PathBuf,
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
