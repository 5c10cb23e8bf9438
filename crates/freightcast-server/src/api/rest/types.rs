//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use chrono::{DateTime, Utc};
use freightcast_sdk::{
    DelayEngine, FeatureImportance, ModelVersion, TrainOutcome, TrainingMetrics,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DelayEngine>,
}

/// Root endpoint body
#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub version: String,
    pub status: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub model_version: Option<ModelVersion>,
}

/// Train and retrain response
#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub status: String,
    pub message: String,
    pub metrics: TrainingMetrics,
    pub warnings: Vec<String>,
    pub version: ModelVersion,
    pub training_date: DateTime<Utc>,
    pub n_features: usize,
    pub model_path: String,
}

impl TrainResponse {
    pub fn from_outcome(outcome: TrainOutcome, message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            metrics: outcome.metrics,
            warnings: outcome.warnings,
            version: outcome.version,
            training_date: outcome.training_date,
            n_features: outcome.n_features,
            model_path: outcome.model_path,
        }
    }
}

/// Feature importance response
#[derive(Debug, Serialize)]
pub struct FeatureImportanceResponse {
    pub features: Vec<FeatureImportance>,
    pub total_features: usize,
}

/// Load model response
#[derive(Debug, Serialize)]
pub struct LoadModelResponse {
    pub status: String,
    pub message: String,
    pub version: ModelVersion,
    pub training_date: DateTime<Utc>,
}
