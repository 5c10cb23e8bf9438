//! API endpoint handlers

use super::extractors::{CsvUpload, JsonExtractor};
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use freightcast_sdk::{ModelInfo, PredictionResult, Record, TrainingMetrics};
use std::collections::BTreeMap;
use tracing::info;

/// Service descriptor listing the endpoints
pub(super) async fn root() -> Json<ServiceDescriptor> {
    let endpoints = BTreeMap::from([
        ("health", "/api/health"),
        ("train", "/api/train"),
        ("retrain", "/api/retrain"),
        ("predict", "/api/predict"),
        ("metrics", "/api/metrics"),
        ("feature_importance", "/api/features/importance"),
        ("model_info", "/api/model/info"),
        ("load_model", "/api/load-model"),
    ]);

    Json(ServiceDescriptor {
        name: "Freightcast Delay Predictor API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        endpoints,
    })
}

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let current = state.engine.current().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: current.is_some(),
        model_version: current.map(|a| a.version),
    })
}

pub(super) async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.engine.model_info().await)
}

/// Train a fresh model from an uploaded CSV
#[axum::debug_handler]
pub(super) async fn train(
    State(state): State<AppState>,
    CsvUpload(dataset): CsvUpload,
) -> Result<Json<TrainResponse>, ServerError> {
    info!(rows = dataset.n_rows(), "Received training request");

    let outcome = state.engine.train(dataset).await?;
    Ok(Json(TrainResponse::from_outcome(
        outcome,
        "Model trained successfully",
    )))
}

/// Retrain; requires a model to exist already
#[axum::debug_handler]
pub(super) async fn retrain(
    State(state): State<AppState>,
    CsvUpload(dataset): CsvUpload,
) -> Result<Json<TrainResponse>, ServerError> {
    info!(rows = dataset.n_rows(), "Received retraining request");

    let outcome = state.engine.retrain(dataset).await?;
    Ok(Json(TrainResponse::from_outcome(
        outcome,
        "Model retrained successfully",
    )))
}

#[axum::debug_handler]
pub(super) async fn predict(
    State(state): State<AppState>,
    JsonExtractor(record): JsonExtractor<Record>,
) -> Result<Json<PredictionResult>, ServerError> {
    let prediction = state.engine.predict(&record).await?;

    info!(
        label = ?prediction.binary_label,
        probability_percent = prediction.probability_percent,
        "Prediction served"
    );

    Ok(Json(prediction))
}

pub(super) async fn metrics(
    State(state): State<AppState>,
) -> Result<Json<TrainingMetrics>, ServerError> {
    Ok(Json(state.engine.metrics().await?))
}

/// Importances sorted descending; empty before the first model
pub(super) async fn feature_importance(
    State(state): State<AppState>,
) -> Json<FeatureImportanceResponse> {
    let features = state.engine.feature_importance().await;
    Json(FeatureImportanceResponse {
        total_features: features.len(),
        features,
    })
}

/// Re-read the persisted artifact
pub(super) async fn load_model(
    State(state): State<AppState>,
) -> Result<Json<LoadModelResponse>, ServerError> {
    let loaded = state.engine.reload_from_store().await.ok_or_else(|| {
        ServerError::NotFound(format!("No model found at {}", state.engine.model_path()))
    })?;

    Ok(Json(LoadModelResponse {
        status: "success".to_string(),
        message: "Model loaded successfully".to_string(),
        version: loaded.version,
        training_date: loaded.training_date,
    }))
}
