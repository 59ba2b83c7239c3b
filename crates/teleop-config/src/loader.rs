//! Loading and saving teleoperation config files.

use std::path::Path;

use teleop_mapping::{JointMapper, JointMappingConfig};
use teleop_safety::SafetyConfig;
use tracing::{debug, info};

use crate::document::ConfigDocument;
use crate::error::{ConfigError, ConfigResult};

/// A validated mapping configuration with its optional safety limits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeleopConfig {
    /// Leader/follower pairing and per-joint transform.
    pub mapping: JointMappingConfig,
    /// Safety limits, when the file has a `safety` section.
    pub safety: Option<SafetyConfig>,
}

impl TeleopConfig {
    /// Create a config from the two records.
    ///
    /// # Errors
    ///
    /// Returns an error if either record fails validation.
    pub fn new(mapping: JointMappingConfig, safety: Option<SafetyConfig>) -> ConfigResult<Self> {
        let config = Self { mapping, safety };
        config.validate()?;
        Ok(config)
    }

    /// Validate both records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mapping`] or [`ConfigError::Safety`].
    pub fn validate(&self) -> ConfigResult<()> {
        self.mapping.validate()?;
        if let Some(safety) = &self.safety {
            safety.validate()?;
        }
        Ok(())
    }

    /// Build a mapper from this config.
    ///
    /// # Errors
    ///
    /// Returns an error if the records fail validation.
    pub fn build_mapper(&self) -> ConfigResult<JointMapper> {
        Ok(JointMapper::new(
            self.mapping.clone(),
            self.safety.clone(),
        )?)
    }

    /// Serialize to the YAML file layout.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        let document = ConfigDocument::from_parts(&self.mapping, self.safety.as_ref());
        Ok(serde_yaml::to_string(&document)?)
    }

    /// Write the config to `path` in the YAML file layout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml_string()?;
        std::fs::write(path, yaml).map_err(|source| ConfigError::io(path, source))?;
        debug!(path = %path.display(), "Teleop config saved");
        Ok(())
    }
}

/// Parse and validate a config document.
///
/// # Errors
///
/// Returns [`ConfigError::Yaml`] for malformed documents (including missing
/// `leader`/`follower` sections and non-numeric values) and
/// [`ConfigError::Mapping`]/[`ConfigError::Safety`] for invalid records.
pub fn from_yaml_str(yaml: &str) -> ConfigResult<TeleopConfig> {
    let document: ConfigDocument = serde_yaml::from_str(yaml)?;
    let (mapping, safety) = document.into_parts();
    TeleopConfig::new(mapping, safety)
}

/// Load and validate the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
/// errors of [`from_yaml_str`].
pub fn load_mapping_config(path: impl AsRef<Path>) -> ConfigResult<TeleopConfig> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
    let config = from_yaml_str(&yaml)?;

    info!(
        path = %path.display(),
        joints = config.mapping.len(),
        safety = config.safety.is_some(),
        "Teleop config loaded"
    );

    Ok(config)
}
