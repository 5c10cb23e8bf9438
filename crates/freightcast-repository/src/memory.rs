//! In-memory artifact store

use async_trait::async_trait;
use freightcast_model::TrainedArtifact;
use tokio::sync::RwLock;

use crate::{traits::ArtifactStore, RepositoryResult};

/// Keeps the artifact as its serialized JSON so a load goes through the same
/// decode path as the file store.
#[derive(Default)]
pub struct MemoryArtifactStore {
    slot: RwLock<Option<String>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }

    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn save(&self, artifact: &TrainedArtifact) -> RepositoryResult<String> {
        let json = serde_json::to_string(artifact)?;
        *self.slot.write().await = Some(json);
        Ok(self.location())
    }

    async fn load(&self) -> Option<TrainedArtifact> {
        let slot = self.slot.read().await;
        let json = slot.as_deref()?;
        match serde_json::from_str(json) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring undecodable in-memory artifact");
                None
            }
        }
    }

    fn location(&self) -> String {
        "memory://delay_predictor".to_string()
    }
}
