//! Model error types

use thiserror::Error;

/// Errors raised while fitting or applying a model
#[derive(Error, Debug)]
pub enum ModelError {
    /// The dataset failed schema validation; carries every error found
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The dataset is valid but cannot support a stratified split and fit
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Numeric values too large in magnitude to standardize
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Feature matrix and fitted pipeline disagree
    #[error("Shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Core error: {0}")]
    Core(#[from] freightcast_core::CoreError),

    /// Generic model error
    #[error("Model error: {0}")]
    Internal(String),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
