//! Core DelayEngine implementation

use std::sync::Arc;

use freightcast_core::{validate_record, Dataset, Record};
use freightcast_model::{
    FeatureImportance, ModelVersion, PredictionResult, TrainedArtifact, TrainingMetrics,
};
use freightcast_repository::ArtifactStore;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::types::{LoadOutcome, ModelInfo, TrainOutcome};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};

/// Process-wide model handle.
///
/// Readers clone the current `Arc<TrainedArtifact>` and release the lock at
/// once. Training runs one at a time; a new artifact is fully built and
/// persisted before it replaces the current one, so a failed run leaves the
/// previous model in place.
pub struct DelayEngine {
    config: EngineConfig,
    store: Arc<dyn ArtifactStore>,
    current: RwLock<Option<Arc<TrainedArtifact>>>,
    train_guard: Mutex<()>,
}

impl DelayEngine {
    /// Create an untrained engine over `store`
    pub fn new(config: EngineConfig, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            config,
            store,
            current: RwLock::new(None),
            train_guard: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Location the artifact is persisted to
    pub fn model_path(&self) -> String {
        self.store.location()
    }

    /// Current artifact, if any
    pub async fn current(&self) -> Option<Arc<TrainedArtifact>> {
        self.current.read().await.clone()
    }

    pub async fn is_trained(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Train on `dataset`. The first model is `1.0.0`; later runs bump the patch.
    pub async fn train(&self, dataset: Dataset) -> Result<TrainOutcome> {
        self.run_training(dataset, false).await
    }

    /// Same as [`train`](Self::train) but requires an existing model
    pub async fn retrain(&self, dataset: Dataset) -> Result<TrainOutcome> {
        self.run_training(dataset, true).await
    }

    async fn run_training(&self, dataset: Dataset, require_existing: bool) -> Result<TrainOutcome> {
        let _guard = self.train_guard.lock().await;

        let previous = self.current().await;
        if require_existing && previous.is_none() {
            return Err(SdkError::NotTrained);
        }
        let previous_version = previous
            .map(|a| a.version)
            .unwrap_or(ModelVersion::UNTRAINED);

        let options = self.config.training_options();
        let run = tokio::task::spawn_blocking(move || {
            freightcast_model::train(&dataset, &options, previous_version)
        })
        .await
        .map_err(|e| SdkError::Internal(format!("training task failed: {}", e)))??;

        let model_path = self.store.save(&run.artifact).await?;

        let artifact = Arc::new(run.artifact);
        *self.current.write().await = Some(Arc::clone(&artifact));

        info!(
            version = %artifact.version,
            warnings = run.warnings.len(),
            path = %model_path,
            "Model artifact replaced"
        );

        Ok(TrainOutcome {
            metrics: artifact.metrics.clone(),
            warnings: run.warnings,
            version: artifact.version,
            training_date: artifact.trained_at,
            n_features: artifact.n_features(),
            model_path,
        })
    }

    /// Score one record against the current model
    pub async fn predict(&self, record: &Record) -> Result<PredictionResult> {
        let artifact = self.current().await.ok_or(SdkError::NotTrained)?;
        validate_record(record).map_err(SdkError::Validation)?;
        Ok(artifact.predict(record)?)
    }

    /// Never fails; reports `is_trained: false` before the first model
    pub async fn model_info(&self) -> ModelInfo {
        match self.current().await {
            Some(artifact) => ModelInfo::from(artifact.as_ref()),
            None => ModelInfo::untrained(),
        }
    }

    /// Metrics of the current model's training run
    pub async fn metrics(&self) -> Result<TrainingMetrics> {
        let artifact = self.current().await.ok_or(SdkError::NotTrained)?;
        Ok(artifact.metrics.clone())
    }

    /// Importances sorted descending; empty when untrained or unavailable
    pub async fn feature_importance(&self) -> Vec<FeatureImportance> {
        self.current()
            .await
            .map(|a| a.ranked_importances())
            .unwrap_or_default()
    }

    /// Replace the current model with the stored one, if the store has one.
    /// The current model is kept when nothing usable is stored.
    pub async fn reload_from_store(&self) -> Option<LoadOutcome> {
        let _guard = self.train_guard.lock().await;

        let artifact = self.store.load().await?;

        let outcome = LoadOutcome {
            version: artifact.version,
            training_date: artifact.trained_at,
        };
        *self.current.write().await = Some(Arc::new(artifact));

        info!(version = %outcome.version, "Loaded stored model artifact");
        Some(outcome)
    }
}
