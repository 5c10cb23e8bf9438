//! Artifact store trait
//!
//! A store holds at most one artifact at one well-known location. Saving
//! overwrites it; loading never fails, a missing or unreadable artifact is
//! simply absent.

use async_trait::async_trait;
use freightcast_model::TrainedArtifact;

use crate::RepositoryResult;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist `artifact`, replacing any previous one. Returns the location written.
    async fn save(&self, artifact: &TrainedArtifact) -> RepositoryResult<String>;

    /// Read the stored artifact, or `None` when there is nothing usable
    async fn load(&self) -> Option<TrainedArtifact>;

    /// Human-readable location of the artifact
    fn location(&self) -> String;
}
