//! Delay engine initialization
//!
//! Converts the server configuration into an SDK engine. The persisted
//! artifact, if any, is loaded while the engine is built.

use crate::config::ServerConfig;
use anyhow::Result;
use freightcast_sdk::{DelayEngine, DelayEngineBuilder};
use tracing::info;

/// Build the engine shared by all request handlers
pub async fn init_engine(config: &ServerConfig) -> Result<DelayEngine> {
    let engine = DelayEngineBuilder::new()
        .with_config(config.engine_config())
        .build()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build delay engine: {}", e))?;

    match engine.current().await {
        Some(artifact) => info!(
            version = %artifact.version,
            path = %engine.model_path(),
            "Delay engine ready with stored model"
        ),
        None => info!(path = %engine.model_path(), "Delay engine ready, no model trained yet"),
    }

    Ok(engine)
}
