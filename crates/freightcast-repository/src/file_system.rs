//! File system artifact store
//!
//! The artifact is one pretty-printed JSON document at `<base>/<file_name>`.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! reader sees either the old document or the new one.

use async_trait::async_trait;
use freightcast_model::TrainedArtifact;
use path_absolutize::Absolutize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_FILE_NAME;
use crate::{error::RepositoryError, traits::ArtifactStore, RepositoryResult};

pub struct FileSystemArtifactStore {
    /// Directory holding the artifact
    root_path: PathBuf,
    file_name: String,
}

impl FileSystemArtifactStore {
    /// Store writing `delay_predictor.json` under `root_path`. The directory
    /// is created on first save.
    ///
    /// ```no_run
    /// use freightcast_repository::FileSystemArtifactStore;
    ///
    /// let store = FileSystemArtifactStore::new("models").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        Self::with_file_name(root_path, DEFAULT_FILE_NAME)
    }

    pub fn with_file_name<P: AsRef<Path>>(
        root_path: P,
        file_name: impl Into<String>,
    ) -> RepositoryResult<Self> {
        let path = root_path.as_ref();
        if path.as_os_str().is_empty() || path.is_file() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        Ok(Self {
            root_path: abs_path,
            file_name: file_name.into(),
        })
    }

    /// Full path of the artifact file
    pub fn artifact_path(&self) -> PathBuf {
        self.root_path.join(&self.file_name)
    }

    fn temp_path(&self) -> PathBuf {
        self.root_path.join(format!(".{}.tmp", self.file_name))
    }

    async fn read(&self) -> RepositoryResult<Option<TrainedArtifact>> {
        let bytes = match fs::read(self.artifact_path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[async_trait]
impl ArtifactStore for FileSystemArtifactStore {
    async fn save(&self, artifact: &TrainedArtifact) -> RepositoryResult<String> {
        let json = serde_json::to_vec_pretty(artifact)?;
        // JSON has no inf or NaN; serde_json writes them as null and load would reject the file
        serde_json::from_slice::<TrainedArtifact>(&json)?;

        fs::create_dir_all(&self.root_path).await?;
        let temp = self.temp_path();
        fs::write(&temp, &json).await?;
        if let Err(e) = fs::rename(&temp, self.artifact_path()).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        let location = self.location();
        info!(
            version = %artifact.version,
            path = %location,
            bytes = json.len(),
            "Saved model artifact"
        );
        Ok(location)
    }

    async fn load(&self) -> Option<TrainedArtifact> {
        match self.read().await {
            Ok(Some(artifact)) => {
                debug!(version = %artifact.version, path = %self.location(), "Loaded model artifact");
                Some(artifact)
            }
            Ok(None) => {
                debug!(path = %self.location(), "No stored model artifact");
                None
            }
            Err(e) => {
                warn!(path = %self.location(), error = %e, "Ignoring unreadable model artifact");
                None
            }
        }
    }

    fn location(&self) -> String {
        self.artifact_path().display().to_string()
    }
}
