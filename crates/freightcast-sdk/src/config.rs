//! Configuration types for DelayEngine

use freightcast_model::{ForestParams, TrainingOptions};
use freightcast_repository::RepositoryConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Share of rows held out for evaluation
    pub test_fraction: f64,

    /// Seed of the stratified split
    pub seed: u64,

    /// Classifier hyperparameters
    pub forest: ForestParams,

    /// Where the artifact is persisted
    pub repository: RepositoryConfig,

    /// Load the stored artifact when the engine is built
    pub load_on_start: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            forest: ForestParams::default(),
            repository: RepositoryConfig::default(),
            load_on_start: true,
        }
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_forest(mut self, forest: ForestParams) -> Self {
        self.forest = forest;
        self
    }

    pub fn with_repository(mut self, repository: RepositoryConfig) -> Self {
        self.repository = repository;
        self
    }

    pub fn load_on_start(mut self, enable: bool) -> Self {
        self.load_on_start = enable;
        self
    }

    /// Options handed to each training run
    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            test_fraction: self.test_fraction,
            seed: self.seed,
            forest: self.forest.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(SdkError::Config(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.forest.n_estimators == 0 {
            return Err(SdkError::Config("forest.n_estimators must be positive".to_string()));
        }
        if self.forest.max_depth == 0 {
            return Err(SdkError::Config("forest.max_depth must be positive".to_string()));
        }
        self.repository
            .validate()
            .map_err(|e| SdkError::Config(e.to_string()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
