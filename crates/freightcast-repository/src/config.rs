//! Artifact store configuration

use serde::{Deserialize, Serialize};

/// Default directory of the persisted artifact
pub const DEFAULT_BASE_PATH: &str = "models";
/// Well-known artifact file name
pub const DEFAULT_FILE_NAME: &str = "delay_predictor.json";

/// Where the artifact lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// JSON file on disk
    #[default]
    FileSystem,
    /// Process memory, lost on restart (tests, ephemeral deployments)
    Memory,
}

/// Artifact store configuration
///
/// ```rust
/// use freightcast_repository::RepositoryConfig;
///
/// let config = RepositoryConfig::file_system("models");
/// assert_eq!(config.file_name, "delay_predictor.json");
///
/// let config = RepositoryConfig::memory();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub source: RepositorySource,

    /// Directory holding the artifact file (FileSystem source)
    pub base_path: String,

    /// Artifact file name inside `base_path`
    pub file_name: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            source: RepositorySource::FileSystem,
            base_path: DEFAULT_BASE_PATH.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl RepositoryConfig {
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            source: RepositorySource::FileSystem,
            base_path: path.into(),
            ..Self::default()
        }
    }

    pub fn memory() -> Self {
        Self {
            source: RepositorySource::Memory,
            ..Self::default()
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source == RepositorySource::FileSystem {
            if self.base_path.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    source: "FileSystem".to_string(),
                    field: "base_path".to_string(),
                });
            }
            if self.file_name.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    source: "FileSystem".to_string(),
                    field: "file_name".to_string(),
                });
            }
            if self.file_name.contains(['/', '\\']) {
                return Err(ConfigError::InvalidFileName(self.file_name.clone()));
            }
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    MissingField { source: String, field: String },
    /// The file name must not contain a path separator
    InvalidFileName(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField { source, field } => {
                write!(f, "{} source requires {} to be set", source, field)
            }
            ConfigError::InvalidFileName(name) => {
                write!(f, "file name '{}' must not contain a path separator", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
