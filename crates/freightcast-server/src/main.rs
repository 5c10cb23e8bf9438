//! Freightcast Delay Predictor HTTP Server
//!
//! Provides REST API for training and scoring freight delay models.

use anyhow::Result;
use freightcast_server::{api, config::ServerConfig, engine};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    init_tracing(&config.log_level)?;
    info!("Loaded configuration: {:?}", config);

    let engine = engine::init_engine(&config).await?;

    let app = api::rest::create_router_with_limit(Arc::new(engine), config.max_upload_bytes);

    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/api/health", addr);
    info!("  Train: POST http://{}/api/train", addr);
    info!("  Predict: POST http://{}/api/predict", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber; `RUST_LOG` overrides `level`
fn init_tracing(level: &str) -> Result<()> {
    let default_filter = format!(
        "freightcast_server={level},freightcast_sdk={level},freightcast_model={level},\
         freightcast_repository={level},tower_http={level}"
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
