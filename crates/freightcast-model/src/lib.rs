//! Freightcast model - fitting and scoring of the delay classifier
//!
//! Turns a validated [`freightcast_core::Dataset`] into a [`TrainedArtifact`]
//! (frozen feature schema, fitted preprocessing, random forest, metrics) and
//! scores single records against it.

pub mod artifact;
pub mod error;
pub mod forest;
pub mod metrics;
pub mod partition;
pub mod predictor;
pub mod preprocessing;
pub mod split;
pub mod trainer;

// Re-export main types
pub use artifact::{FeatureImportance, FittedPipeline, ModelVersion, TrainedArtifact};
pub use error::{ModelError, Result};
pub use forest::{ForestParams, RandomForest};
pub use metrics::TrainingMetrics;
pub use partition::partition_features;
pub use predictor::{DelayLabel, PredictionResult, RiskLevel};
pub use preprocessing::{OneHotEncoder, Preprocessor, StandardScaler};
pub use split::{stratified_split, SplitIndices};
pub use trainer::{train, TrainingOptions, TrainingRun};
