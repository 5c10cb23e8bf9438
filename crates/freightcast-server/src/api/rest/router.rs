//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use freightcast_sdk::DelayEngine;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Upload limit used by [`create_router`]
pub const DEFAULT_UPLOAD_LIMIT: usize = 50 * 1024 * 1024;

/// Create REST API router
pub fn create_router(engine: Arc<DelayEngine>) -> Router {
    create_router_with_limit(engine, DEFAULT_UPLOAD_LIMIT)
}

/// Create REST API router accepting CSV uploads up to `upload_limit` bytes
pub fn create_router_with_limit(engine: Arc<DelayEngine>, upload_limit: usize) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/model/info", get(model_info))
        .route("/api/train", post(train))
        .route("/api/retrain", post(retrain))
        .route("/api/predict", post(predict))
        .route("/api/metrics", get(metrics))
        .route("/api/features/importance", get(feature_importance))
        .route("/api/load-model", post(load_model))
        .with_state(state)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
