use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatonError {
    #[error("Invalid session name: {0}")]
    InvalidName(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Corrupt checkpoint record: {0}")]
    CorruptRecord(String),
    #[error("Storage read error at {path}: {source}")]
    StorageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Storage write error at {path}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl BatonError {
    pub fn storage_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageRead {
            path: path.into(),
            source,
        }
    }

    pub fn storage_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }
}
