//! Error types for configuration loading.

use std::path::{Path, PathBuf};

use teleop_mapping::MappingError;
use teleop_safety::SafetyError;
use thiserror::Error;

/// Errors raised while loading a teleoperation config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not match the expected layout.
    #[error("Invalid config document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The `leader`/`follower`/`mapping` sections failed validation.
    #[error("Invalid joint mapping: {0}")]
    Mapping(#[from] MappingError),

    /// The `safety` section failed validation.
    #[error("Invalid safety limits: {0}")]
    Safety(#[from] SafetyError),
}

impl ConfigError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Line of a YAML syntax or layout error, as reported by the parser.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Yaml(err) => err.location().map(|loc| loc.line()),
            _ => None,
        }
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
