//! Freightcast SDK
//!
//! High-level API for training and scoring freight delay models behind one
//! shared [`DelayEngine`] handle.

pub mod builder;
pub mod config;
pub mod delay_engine;
pub mod error;

// Re-export main types
pub use builder::DelayEngineBuilder;
pub use config::EngineConfig;
pub use delay_engine::{DelayEngine, LoadOutcome, ModelInfo, TrainOutcome};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use freightcast_core::{validate_record, Dataset, Record, Value};
pub use freightcast_model::{
    DelayLabel, FeatureImportance, ForestParams, ModelVersion, PredictionResult, RiskLevel,
    TrainingMetrics,
};
pub use freightcast_repository::{ArtifactStore, RepositoryConfig, RepositorySource};
