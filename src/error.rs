use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem failures inside the persistence layer.
///
/// The public `Store` surface turns these into `None`/`false`; they exist so
/// the failure can be logged with its path before being flattened.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to replace {path}: {source}")]
    Replace { path: PathBuf, source: io::Error },
    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("{path} has no parent directory")]
    NoParent { path: PathBuf },
}

pub type StoreResult<T> = Result<T, StoreError>;
