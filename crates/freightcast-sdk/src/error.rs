//! SDK error types

use freightcast_core::CoreError;
use freightcast_model::ModelError;
use freightcast_repository::RepositoryError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Dataset or record rejected; carries every error found
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Operation needs a trained model and none is loaded
    #[error("Model has not been trained yet")]
    NotTrained,

    /// Uploaded data could not be read as a dataset
    #[error("Dataset error: {0}")]
    Dataset(#[from] CoreError),

    /// Fitting or scoring failed
    #[error("Model error: {0}")]
    Model(ModelError),

    /// Artifact could not be persisted
    #[error("Persistence error: {0}")]
    Persistence(#[from] RepositoryError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic SDK error
    #[error("SDK error: {0}")]
    Internal(String),
}

impl From<ModelError> for SdkError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(errors) => SdkError::Validation(errors),
            other => SdkError::Model(other),
        }
    }
}

impl SdkError {
    /// True when the caller can fix the problem by changing its input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SdkError::Validation(_)
                | SdkError::NotTrained
                | SdkError::Dataset(_)
                | SdkError::Model(ModelError::InsufficientData(_))
                | SdkError::Model(ModelError::OutOfRange(_))
        )
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
