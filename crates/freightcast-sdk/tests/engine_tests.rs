//! Integration tests for DelayEngine: train, retrain, predict, persistence

mod common;

use std::sync::Arc;

use failing_store::FailingStore;
use common::{memory_engine, quick_forest, synthetic_csv_with_header, synthetic_dataset, trip};
use freightcast_sdk::{
    Dataset, DelayEngine, DelayEngineBuilder, DelayLabel, EngineConfig, RepositoryConfig,
    RiskLevel, SdkError, Value,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_predict_before_training_is_not_trained() {
    let engine = memory_engine().await;

    let result = engine.predict(&trip("high", 50.0, "Van")).await;
    assert!(matches!(result, Err(SdkError::NotTrained)));
}

#[tokio::test]
async fn test_retrain_before_training_is_not_trained() {
    let engine = memory_engine().await;

    let result = engine.retrain(synthetic_dataset(200, 1)).await;
    assert!(matches!(result, Err(SdkError::NotTrained)));
    assert!(!engine.is_trained().await);
}

#[tokio::test]
async fn test_model_info_before_training() {
    let engine = memory_engine().await;

    let info = engine.model_info().await;
    assert!(!info.is_trained);
    assert!(info.version.is_none());
    assert!(info.last_metrics.is_none());
    assert!(engine.feature_importance().await.is_empty());
    assert!(matches!(engine.metrics().await, Err(SdkError::NotTrained)));
}

#[tokio::test]
async fn test_versions_increase_per_training_run() {
    let engine = memory_engine().await;

    let mut versions = Vec::new();
    for seed in 0..3 {
        let outcome = if seed == 0 {
            engine.train(synthetic_dataset(200, seed)).await
        } else {
            engine.retrain(synthetic_dataset(200, seed)).await
        }
        .unwrap();
        versions.push(outcome.version.to_string());
    }

    assert_eq!(versions, vec!["1.0.0", "1.0.1", "1.0.2"]);
    assert_eq!(
        engine.model_info().await.version.map(|v| v.to_string()),
        Some("1.0.2".to_string())
    );
}

#[tokio::test]
async fn test_train_outcome_shape() {
    let engine = memory_engine().await;

    let outcome = engine.train(synthetic_dataset(300, 5)).await.unwrap();
    assert_eq!(outcome.metrics.test_size, 60);
    assert_eq!(outcome.metrics.train_size, 240);
    assert_eq!(outcome.n_features, 8);
    assert_eq!(outcome.model_path, "memory://delay_predictor");
    assert!(outcome.warnings.is_empty());
    assert!(outcome.metrics.auc.is_some());

    let info = engine.model_info().await;
    assert!(info.is_trained);
    assert_eq!(
        info.categorical_features,
        vec!["route_variant_id", "traffic_level_forecast", "vehicle_type"]
    );
    assert_eq!(info.numerical_features.len(), 5);
}

#[tokio::test]
async fn test_missing_column_rejected_without_touching_model() {
    let engine = memory_engine().await;
    engine.train(synthetic_dataset(200, 2)).await.unwrap();
    let before = engine.current().await.unwrap();

    let header = common::HEADER.replace(",distance_km", "").replace(",vehicle_type", "");
    let csv = synthetic_csv_with_header(&header, 200, 3);
    let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();

    match engine.train(dataset).await {
        Err(SdkError::Validation(errors)) => {
            let missing = errors
                .iter()
                .find(|e| e.starts_with("Missing required columns"))
                .expect("missing-columns error");
            assert!(missing.contains("vehicle_type"));
            assert!(missing.contains("distance_km"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let after = engine.current().await.unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.version.to_string(), "1.0.0");
}

#[tokio::test]
async fn test_high_traffic_heavy_rain_scores_high_risk() {
    let engine = memory_engine().await;
    engine.train(synthetic_dataset(400, 11)).await.unwrap();

    let risky = engine.predict(&trip("high", 52.0, "Rigid Truck")).await.unwrap();
    assert!(risky.probability >= 0.7, "probability {}", risky.probability);
    assert_eq!(risky.risk_level, RiskLevel::High);
    assert_eq!(risky.risk_color, "red");
    assert_eq!(risky.binary_label, DelayLabel::Delayed);

    let calm = engine.predict(&trip("low", 0.0, "Van")).await.unwrap();
    assert!(calm.probability < 0.3, "probability {}", calm.probability);
    assert_eq!(calm.risk_level, RiskLevel::Low);
    assert_eq!(calm.binary_label, DelayLabel::OnTime);
}

#[tokio::test]
async fn test_unseen_vehicle_type_predicts() {
    let engine = memory_engine().await;
    engine.train(synthetic_dataset(200, 4)).await.unwrap();

    let result = engine.predict(&trip("medium", 5.0, "Hovercraft")).await;
    let prediction = result.unwrap();
    assert!((0.0..=1.0).contains(&prediction.probability));
}

#[tokio::test]
async fn test_invalid_record_rejected() {
    let engine = memory_engine().await;
    engine.train(synthetic_dataset(200, 6)).await.unwrap();

    let mut record = trip("high", 10.0, "Van");
    record.insert("planned_departure_hour".into(), Value::from(24));
    record.insert("traffic_level_forecast".into(), Value::from("jammed"));
    record.remove("cargo_weight_kg");

    match engine.predict(&record).await {
        Err(SdkError::Validation(errors)) => {
            assert_eq!(errors.len(), 3);
            assert!(errors.iter().any(|e| e.contains("between 0 and 23")));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_extra_record_fields_are_ignored() {
    let engine = memory_engine().await;
    engine.train(synthetic_dataset(200, 8)).await.unwrap();

    let plain = engine.predict(&trip("high", 45.0, "Van")).await.unwrap();
    let mut noisy = trip("high", 45.0, "Van");
    noisy.insert("driver_name".into(), Value::from("Alex"));
    let with_extra = engine.predict(&noisy).await.unwrap();

    assert_eq!(plain, with_extra);
}

#[tokio::test]
async fn test_feature_importance_sorted() {
    let engine = memory_engine().await;
    engine.train(synthetic_dataset(300, 9)).await.unwrap();

    let importances = engine.feature_importance().await;
    assert!(!importances.is_empty());
    assert!(importances
        .windows(2)
        .all(|w| w[0].importance >= w[1].importance));
    let total: f64 = importances.iter().map(|f| f.importance).sum();
    assert!((total - 1.0).abs() < 1e-6);

    let top: Vec<&str> = importances.iter().take(3).map(|f| f.feature.as_str()).collect();
    assert!(top.contains(&"rain_forecast_mm"), "top features {:?}", top);
}

#[tokio::test]
async fn test_persisted_model_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let repository = RepositoryConfig::file_system(temp_dir.path().to_string_lossy().to_string());

    let first = DelayEngineBuilder::new()
        .with_repository(repository.clone())
        .with_forest(quick_forest())
        .build()
        .await
        .unwrap();
    let outcome = first.train(synthetic_dataset(200, 12)).await.unwrap();
    assert!(outcome.model_path.ends_with("delay_predictor.json"));
    let saved = first.current().await.unwrap();

    let restarted = DelayEngineBuilder::new()
        .with_repository(repository)
        .with_forest(quick_forest())
        .build()
        .await
        .unwrap();
    let loaded = restarted.current().await.unwrap();

    assert_eq!(loaded.version, saved.version);
    assert_eq!(loaded.schema, saved.schema);
    assert_eq!(loaded.metrics, saved.metrics);

    let query = trip("high", 48.0, "Van");
    assert_eq!(
        first.predict(&query).await.unwrap(),
        restarted.predict(&query).await.unwrap()
    );

    let next = restarted.retrain(synthetic_dataset(200, 13)).await.unwrap();
    assert_eq!(next.version.to_string(), "1.0.1");
}

#[tokio::test]
async fn test_reload_from_empty_store_keeps_model() {
    let engine = memory_engine().await;
    assert!(engine.reload_from_store().await.is_none());

    engine.train(synthetic_dataset(200, 14)).await.unwrap();
    let reloaded = engine.reload_from_store().await.unwrap();
    assert_eq!(reloaded.version.to_string(), "1.0.0");
    assert!(engine.is_trained().await);
}

#[tokio::test]
async fn test_failed_save_keeps_previous_model() {
    let store = Arc::new(FailingStore::default());
    let engine = DelayEngine::new(
        EngineConfig::new().with_forest(quick_forest()),
        store.clone(),
    );

    engine.train(synthetic_dataset(200, 15)).await.unwrap();
    store.fail_next_save();

    let result = engine.retrain(synthetic_dataset(200, 16)).await;
    assert!(matches!(result, Err(SdkError::Persistence(_))));
    assert_eq!(engine.current().await.unwrap().version.to_string(), "1.0.0");
}

#[tokio::test]
async fn test_predictions_during_retrain_see_whole_models() {
    let engine = Arc::new(memory_engine().await);
    engine.train(synthetic_dataset(200, 17)).await.unwrap();

    let trainer = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.retrain(synthetic_dataset(300, 18)).await })
    };

    let mut readers = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        readers.push(tokio::spawn(async move {
            engine.predict(&trip("high", 50.0, "Van")).await
        }));
    }

    for reader in readers {
        assert!(reader.await.unwrap().is_ok());
    }
    assert_eq!(trainer.await.unwrap().unwrap().version.to_string(), "1.0.1");
}

/// Store whose next save can be made to fail
mod failing_store {
    use std::sync::atomic::{AtomicBool, Ordering};

    use freightcast_model::TrainedArtifact;
    use freightcast_repository::{
        ArtifactStore, MemoryArtifactStore, RepositoryError, RepositoryResult,
    };

    #[derive(Default)]
    pub struct FailingStore {
        inner: MemoryArtifactStore,
        fail: AtomicBool,
    }

    impl FailingStore {
        pub fn fail_next_save(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl ArtifactStore for FailingStore {
        async fn save(&self, artifact: &TrainedArtifact) -> RepositoryResult<String> {
            if self.fail.swap(false, Ordering::SeqCst) {
                return Err(RepositoryError::Other("disk unavailable".to_string()));
            }
            self.inner.save(artifact).await
        }

        async fn load(&self) -> Option<TrainedArtifact> {
            self.inner.load().await
        }

        fn location(&self) -> String {
            "failing://delay_predictor".to_string()
        }
    }
}
