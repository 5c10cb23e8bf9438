//! Trained model artifact and its version

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use freightcast_core::FeatureSchema;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::forest::RandomForest;
use crate::metrics::TrainingMetrics;
use crate::preprocessing::Preprocessor;

/// Semantic `major.minor.patch` model version, serialized as a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ModelVersion {
    /// `0.0.0`, the version reported before any training
    pub const UNTRAINED: ModelVersion = ModelVersion {
        major: 0,
        minor: 0,
        patch: 0,
    };

    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Version of the next training run. The first run is `1.0.0`; after that
    /// only the patch component moves.
    pub fn next(self) -> Self {
        if self == Self::UNTRAINED {
            Self::new(1, 0, 0)
        } else {
            Self {
                patch: self.patch + 1,
                ..self
            }
        }
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ModelVersion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        let parse = |p: &str| {
            p.parse::<u32>()
                .map_err(|_| ModelError::Internal(format!("invalid model version '{}'", s)))
        };
        match parts.as_slice() {
            [major, minor, patch] => Ok(Self::new(parse(major)?, parse(minor)?, parse(patch)?)),
            _ => Err(ModelError::Internal(format!("invalid model version '{}'", s))),
        }
    }
}

impl TryFrom<String> for ModelVersion {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelVersion> for String {
    fn from(version: ModelVersion) -> Self {
        version.to_string()
    }
}

/// Fitted preprocessing plus classifier, always used together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    pub preprocessor: Preprocessor,
    pub forest: RandomForest,
}

/// Importance of one transformed feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// One trained model generation: everything needed to score and describe it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArtifact {
    pub version: ModelVersion,
    pub trained_at: DateTime<Utc>,
    pub schema: FeatureSchema,
    pub pipeline: FittedPipeline,
    pub metrics: TrainingMetrics,
    /// `None` when feature names could not be aligned with the classifier
    pub feature_importances: Option<Vec<FeatureImportance>>,
}

impl TrainedArtifact {
    /// Importances sorted descending; empty when unavailable
    pub fn ranked_importances(&self) -> Vec<FeatureImportance> {
        let mut ranked = self.feature_importances.clone().unwrap_or_default();
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        ranked
    }

    /// Number of raw feature columns (categorical + numerical)
    pub fn n_features(&self) -> usize {
        self.schema.len()
    }
}
