//! Error types for the repository layer

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur while persisting a model artifact
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact could not be encoded or decoded
    #[error("Failed to (de)serialize artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid path provided
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Store configuration rejected
    #[error("Invalid repository config: {0}")]
    Config(#[from] ConfigError),

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}
