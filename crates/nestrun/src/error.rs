use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Archive(#[from] nestrun_archive::Error),

    #[error(transparent)]
    TargetDir(#[from] nestrun_fs::Error),

    #[error("the descriptor of '{0}' has to set 'delegatedMainClass'")]
    MissingEntryPoint(PathBuf),

    #[error("entry point '{0}' can't be resolved")]
    EntryPointNotFound(String),

    #[error("tray icon provider '{0}' can't be resolved")]
    TrayProviderNotFound(String),

    #[error("tray icon from '{name}' could not be initialized: {source}")]
    TrayProvider {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether the launcher is running from loose files instead of an archive.
    pub fn is_not_packaged(&self) -> bool {
        matches!(self, Self::Archive(nestrun_archive::Error::NotPackaged(_)))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
