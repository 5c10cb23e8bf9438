//! Training orchestration
//!
//! validate -> partition -> stratified split -> fit on train -> evaluate on
//! test -> align importances -> stamp version. Nothing here touches shared
//! state; the caller decides when the returned artifact becomes current.

use chrono::Utc;
use freightcast_core::types::schema::{DELAY_LABEL, LABEL_DELAYED};
use freightcast_core::{validate_dataset, Dataset, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::artifact::{FeatureImportance, FittedPipeline, ModelVersion, TrainedArtifact};
use crate::error::{ModelError, Result};
use crate::forest::{ForestParams, RandomForest};
use crate::metrics::TrainingMetrics;
use crate::partition::partition_features;
use crate::preprocessing::Preprocessor;
use crate::split::stratified_split;

/// Knobs of one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOptions {
    pub test_fraction: f64,
    /// Seed of the train/test split
    pub seed: u64,
    pub forest: ForestParams,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            forest: ForestParams::default(),
        }
    }
}

/// Successful training outcome
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub artifact: TrainedArtifact,
    /// Non-blocking findings from dataset validation
    pub warnings: Vec<String>,
}

/// Train a new artifact on `dataset`, versioned as the successor of `previous`.
pub fn train(
    dataset: &Dataset,
    options: &TrainingOptions,
    previous: ModelVersion,
) -> Result<TrainingRun> {
    let report = validate_dataset(dataset);
    if !report.is_valid() {
        return Err(ModelError::Validation(report.errors));
    }

    info!(rows = dataset.n_rows(), columns = dataset.n_columns(), "Starting training run");

    let schema = partition_features(dataset);
    let labels = encode_labels(dataset)?;

    let split = stratified_split(&labels, options.test_fraction, options.seed)?;
    debug!(train = split.train.len(), test = split.test.len(), "Stratified split");

    let train_rows = dataset.select_rows(&split.train);
    let test_rows = dataset.select_rows(&split.test);
    let y_train: Vec<u8> = split.train.iter().map(|&i| labels[i]).collect();
    let y_test: Vec<u8> = split.test.iter().map(|&i| labels[i]).collect();

    let preprocessor = Preprocessor::fit(&train_rows, &schema)?;
    let x_train = preprocessor.transform(&train_rows);
    let x_test = preprocessor.transform(&test_rows);

    let forest = RandomForest::fit(&x_train, &y_train, &options.forest)?;
    let proba = forest.predict_proba(&x_test)?;
    let metrics = TrainingMetrics::evaluate(&y_test, &proba, y_train.len());

    let feature_importances = preprocessor
        .feature_names(forest.n_features())
        .map(|names| {
            names
                .into_iter()
                .zip(forest.feature_importances())
                .map(|(feature, &importance)| FeatureImportance {
                    feature,
                    importance,
                })
                .collect::<Vec<_>>()
        });
    if feature_importances.is_none() {
        debug!("Feature names unavailable; importances not reported");
    }

    let version = previous.next();
    info!(
        version = %version,
        accuracy = metrics.accuracy,
        auc = ?metrics.auc,
        n_features = schema.len(),
        "Training run complete"
    );

    Ok(TrainingRun {
        artifact: TrainedArtifact {
            version,
            trained_at: Utc::now(),
            schema,
            pipeline: FittedPipeline {
                preprocessor,
                forest,
            },
            metrics,
            feature_importances,
        },
        warnings: report.warnings,
    })
}

/// `delayed` -> 1, `on_time` -> 0
fn encode_labels(dataset: &Dataset) -> Result<Vec<u8>> {
    let column = dataset
        .column(DELAY_LABEL)
        .ok_or_else(|| ModelError::Validation(vec![format!("Missing required columns: {}", DELAY_LABEL)]))?;

    Ok(column
        .values
        .iter()
        .map(|v| u8::from(matches!(v, Value::String(s) if s == LABEL_DELAYED)))
        .collect())
}
