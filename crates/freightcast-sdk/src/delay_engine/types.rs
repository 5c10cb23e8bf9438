//! Response types for DelayEngine

use chrono::{DateTime, Utc};
use freightcast_model::{ModelVersion, TrainedArtifact, TrainingMetrics};
use serde::{Deserialize, Serialize};

/// Result of a successful train or retrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainOutcome {
    pub metrics: TrainingMetrics,
    /// Non-blocking validation findings
    pub warnings: Vec<String>,
    pub version: ModelVersion,
    pub training_date: DateTime<Utc>,
    /// Raw feature columns (categorical + numerical)
    pub n_features: usize,
    /// Where the artifact was persisted
    pub model_path: String,
}

/// Snapshot of the current model; safe to request at any time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub is_trained: bool,
    pub version: Option<ModelVersion>,
    pub training_date: Option<DateTime<Utc>>,
    pub categorical_features: Vec<String>,
    pub numerical_features: Vec<String>,
    pub last_metrics: Option<TrainingMetrics>,
}

impl ModelInfo {
    pub fn untrained() -> Self {
        Self {
            is_trained: false,
            version: None,
            training_date: None,
            categorical_features: Vec::new(),
            numerical_features: Vec::new(),
            last_metrics: None,
        }
    }
}

impl From<&TrainedArtifact> for ModelInfo {
    fn from(artifact: &TrainedArtifact) -> Self {
        Self {
            is_trained: true,
            version: Some(artifact.version),
            training_date: Some(artifact.trained_at),
            categorical_features: artifact.schema.categorical(),
            numerical_features: artifact.schema.numerical(),
            last_metrics: Some(artifact.metrics.clone()),
        }
    }
}

/// Artifact swapped in by a reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub version: ModelVersion,
    pub training_date: DateTime<Utc>,
}
