use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create temp root '{path}': {source}")]
    CreateRoot { path: PathBuf, source: io::Error },

    #[error("target directory already exists: '{0}'")]
    AlreadyExists(PathBuf),

    #[error("failed to create target directory '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
