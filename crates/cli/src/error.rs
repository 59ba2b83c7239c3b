//! Error types for teleopctl

use teleop_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid sample on line {line}: {message}")]
    InvalidSample { line: usize, message: String },

    #[error("Failed to read input: {0}")]
    InputRead(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_sample(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidSample {
            line,
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::InvalidSample { .. } | Self::InputRead(_) => 3,
            Self::IoError(_) | Self::JsonError(_) => 1,
        }
    }
}

/// Exit code for any error surfaced by a command.
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    error.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
