//! Unit tests for MemoryArtifactStore

mod common;

use common::sample_artifact;
use freightcast_model::ModelVersion;
use freightcast_repository::{open_store, ArtifactStore, MemoryArtifactStore, RepositoryConfig};

#[tokio::test]
async fn test_empty_store_loads_nothing() {
    let store = MemoryArtifactStore::new();
    assert!(store.is_empty().await);
    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn test_round_trip_and_overwrite() {
    let store = MemoryArtifactStore::new();
    let first = sample_artifact(ModelVersion::UNTRAINED);
    let second = sample_artifact(first.version);

    store.save(&first).await.unwrap();
    assert_eq!(store.load().await.unwrap(), first);

    store.save(&second).await.unwrap();
    assert_eq!(store.load().await.unwrap().version.to_string(), "1.0.1");

    store.clear().await;
    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn test_open_memory_store() {
    let store = open_store(&RepositoryConfig::memory()).unwrap();
    assert_eq!(store.location(), "memory://delay_predictor");
    assert!(store.load().await.is_none());
}
