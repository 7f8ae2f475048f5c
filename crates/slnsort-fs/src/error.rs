//! Error types for slnsort-fs

use std::path::PathBuf;

/// Result type for slnsort-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in slnsort-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free backup name for {path}")]
    BackupExhausted { path: PathBuf },

    #[error("Character {character:?} cannot be written in a single-byte encoding")]
    Unencodable { character: char },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
