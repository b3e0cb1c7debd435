use crate::php::PhpError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A flat key that does not have the `[namespace::]file.path` shape.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("cannot parse translation key '{key}': {reason}")]
pub struct KeyParseError {
    /// The offending key.
    pub key: String,
    /// What is wrong with it.
    pub reason: &'static str,
}

impl KeyParseError {
    pub fn new(key: impl Into<String>, reason: &'static str) -> Self {
        Self {
            key: key.into(),
            reason,
        }
    }
}

/// A translation file that cannot be read as a nested array.
#[derive(Debug, Error)]
#[error("invalid translation file {}: {kind}", path.display())]
pub struct InvalidFileError {
    /// The file that failed to load.
    pub path: PathBuf,
    /// Why it failed.
    pub kind: InvalidFileKind,
}

#[derive(Debug, Error)]
pub enum InvalidFileKind {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Php(#[from] PhpError),
}

impl InvalidFileError {
    pub fn new(path: &Path, kind: impl Into<InvalidFileKind>) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: kind.into(),
        }
    }
}

/// Errors that abort value aggregation for a whole locale.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to list translation files: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    InvalidFile(#[from] InvalidFileError),
}

/// Errors that abort writing one translation file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("namespace '{0}' is not registered")]
    UnknownNamespace(String),

    #[error(transparent)]
    InvalidFile(#[from] InvalidFileError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
