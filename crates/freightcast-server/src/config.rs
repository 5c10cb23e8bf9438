//! Server configuration

use freightcast_sdk::{EngineConfig, ForestParams, RepositoryConfig};
use serde::{Deserialize, Serialize};

/// Training section of the server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Share of rows held out for evaluation
    pub test_fraction: f64,

    /// Seed of the stratified split
    pub seed: u64,

    /// Classifier hyperparameters
    pub forest: ForestParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            test_fraction: engine.test_fraction,
            seed: engine.seed,
            forest: engine.forest,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Directory holding the persisted model artifact
    pub models_dir: String,

    /// Log level applied to the freightcast crates when `RUST_LOG` is unset
    pub log_level: String,

    /// Largest accepted CSV upload, in bytes
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub training: TrainingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            models_dir: "models".to_string(),
            log_level: "info".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
            training: TrainingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(
                config::Environment::with_prefix("FREIGHTCAST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Engine configuration persisting under `models_dir`
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_test_fraction(self.training.test_fraction)
            .with_seed(self.training.seed)
            .with_forest(self.training.forest.clone())
            .with_repository(RepositoryConfig::file_system(self.models_dir.clone()))
    }

    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freightcast_sdk::RepositorySource;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.models_dir, "models");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.training.test_fraction, 0.2);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_engine_config_uses_models_dir() {
        let mut config = ServerConfig::default();
        config.models_dir = "/var/lib/freightcast".to_string();
        config.training.seed = 9;

        let engine = config.engine_config();
        assert_eq!(engine.seed, 9);
        assert_eq!(engine.repository.source, RepositorySource::FileSystem);
        assert_eq!(engine.repository.base_path, "/var/lib/freightcast");
        assert!(engine.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"port": 9100, "training": {"seed": 3}}"#).unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.training.seed, 3);
        assert_eq!(config.training.test_fraction, 0.2);
        assert_eq!(config.training.forest.n_estimators, 100);
    }
}
