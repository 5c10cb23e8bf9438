//! Persistence of trained delay models
//!
//! One deployment keeps exactly one artifact at a well-known location. Two
//! backends implement [`ArtifactStore`]:
//!
//! - [`FileSystemArtifactStore`]: JSON file on disk, replaced atomically
//! - [`MemoryArtifactStore`]: process memory, for tests and ephemeral runs
//!
//! ```no_run
//! use freightcast_repository::{open_store, ArtifactStore, RepositoryConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = open_store(&RepositoryConfig::file_system("models"))?;
//! if let Some(artifact) = store.load().await {
//!     println!("model {} trained at {}", artifact.version, artifact.trained_at);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod traits;

use std::sync::Arc;

// Re-exports - Configuration
pub use config::{ConfigError, RepositoryConfig, RepositorySource};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Stores
pub use file_system::FileSystemArtifactStore;
pub use memory::MemoryArtifactStore;
pub use traits::ArtifactStore;

/// Build the store described by `config`
pub fn open_store(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn ArtifactStore>> {
    config.validate()?;
    Ok(match config.source {
        RepositorySource::FileSystem => Arc::new(FileSystemArtifactStore::with_file_name(
            &config.base_path,
            config.file_name.clone(),
        )?),
        RepositorySource::Memory => Arc::new(MemoryArtifactStore::new()),
    })
}
