// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ManifestError>;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("key material unavailable at {}: {reason}", path.display())]
    StartupKeyMissing { path: PathBuf, reason: String },

    #[error("invalid manifest input: {0}")]
    InputFormat(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("envelope could not be opened: {0}")]
    Decryption(String),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification callers use to map failures onto responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StartupKeyMissing,
    InputFormat,
    Encryption,
    Decryption,
    Storage,
    Config,
    Io,
}

impl ManifestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManifestError::StartupKeyMissing { .. } => ErrorKind::StartupKeyMissing,
            ManifestError::InputFormat(_) => ErrorKind::InputFormat,
            ManifestError::Encryption(_) => ErrorKind::Encryption,
            ManifestError::Decryption(_) => ErrorKind::Decryption,
            ManifestError::Storage(_) => ErrorKind::Storage,
            ManifestError::Config(_) => ErrorKind::Config,
            ManifestError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn key_missing(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ManifestError::StartupKeyMissing {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<csv::Error> for ManifestError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => ManifestError::InputFormat(format!("line {}: {err}", pos.line())),
            None => ManifestError::InputFormat(err.to_string()),
        }
    }
}
