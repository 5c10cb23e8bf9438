//! Builder pattern for DelayEngine

use crate::config::EngineConfig;
use crate::delay_engine::DelayEngine;
use crate::error::{Result, SdkError};
use freightcast_model::ForestParams;
use freightcast_repository::{open_store, ArtifactStore, RepositoryConfig};
use std::sync::Arc;
use tracing::info;

/// Builder for DelayEngine
///
/// # Example
///
/// ```rust,no_run
/// use freightcast_sdk::{DelayEngineBuilder, RepositoryConfig};
///
/// # async fn run() -> freightcast_sdk::Result<()> {
/// // Persist to ./models/delay_predictor.json, loading it if present
/// let engine = DelayEngineBuilder::new()
///     .with_repository(RepositoryConfig::file_system("models"))
///     .build()
///     .await?;
///
/// // Ephemeral engine for tests
/// let engine = DelayEngineBuilder::new()
///     .with_repository(RepositoryConfig::memory())
///     .with_seed(7)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct DelayEngineBuilder {
    config: EngineConfig,
    store: Option<Arc<dyn ArtifactStore>>,
}

impl DelayEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            store: None,
        }
    }

    /// Start from a complete configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where the artifact is persisted
    pub fn with_repository(mut self, config: RepositoryConfig) -> Self {
        self.config.repository = config;
        self
    }

    /// Use an already constructed store instead of building one from config
    pub fn with_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.config.test_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_forest(mut self, forest: ForestParams) -> Self {
        self.config.forest = forest;
        self
    }

    /// Load the stored artifact during `build` (default on)
    pub fn load_on_start(mut self, enable: bool) -> Self {
        self.config.load_on_start = enable;
        self
    }

    /// Build the engine, loading the persisted artifact when configured to.
    /// A missing artifact is not an error; the engine starts untrained.
    pub async fn build(self) -> Result<DelayEngine> {
        self.config.validate()?;

        let store = match self.store {
            Some(store) => store,
            None => open_store(&self.config.repository)
                .map_err(|e| SdkError::Config(format!("Failed to open artifact store: {}", e)))?,
        };

        let load = self.config.load_on_start;
        let engine = DelayEngine::new(self.config, store);

        if load && engine.reload_from_store().await.is_none() {
            info!(path = %engine.model_path(), "Starting without a trained model");
        }

        Ok(engine)
    }
}

impl Default for DelayEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
