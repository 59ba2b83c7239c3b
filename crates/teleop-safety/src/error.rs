//! Error types for safety configuration.
//!
//! Every variant describes a configuration defect detected when a
//! [`SafetyConfig`](crate::SafetyConfig) is validated. The per-tick limiter
//! path is infallible and never produces these.

use thiserror::Error;

/// Errors raised while validating a safety configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SafetyError {
    /// The soft margin is negative, NaN or infinite.
    #[error("Invalid soft margin {0}: must be finite and non-negative")]
    InvalidMargin(f64),

    /// A position bound is NaN, or infinite on the side it is meant to bound
    /// (`min = +inf` or `max = -inf`).
    #[error("Position {bound} for joint '{joint}' is NaN or an unreachable infinity")]
    NonFiniteLimit {
        /// Joint the bound belongs to.
        joint: String,
        /// Which bound was rejected (`"min"` or `"max"`).
        bound: &'static str,
    },

    /// A velocity limit is negative or NaN.
    #[error("Invalid velocity limit {value} for joint '{joint}': must be non-negative")]
    InvalidVelocityLimit {
        /// Joint the limit belongs to.
        joint: String,
        /// The rejected value.
        value: f64,
    },

    /// The usable band collapses once the soft margin is applied to both ends.
    #[error("Inverted position range for joint '{joint}': [{lower}, {upper}] after soft margin")]
    InvertedRange {
        /// Joint whose band is empty.
        joint: String,
        /// `position_min + soft_margin`.
        lower: f64,
        /// `position_max - soft_margin`.
        upper: f64,
    },
}

impl SafetyError {
    /// Create an inverted range error.
    #[must_use]
    pub fn inverted_range(joint: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self::InvertedRange {
            joint: joint.into(),
            lower,
            upper,
        }
    }

    /// Create an invalid velocity limit error.
    #[must_use]
    pub fn invalid_velocity_limit(joint: impl Into<String>, value: f64) -> Self {
        Self::InvalidVelocityLimit {
            joint: joint.into(),
            value,
        }
    }

    /// Create a non-finite position bound error.
    #[must_use]
    pub fn non_finite_limit(joint: impl Into<String>, bound: &'static str) -> Self {
        Self::NonFiniteLimit {
            joint: joint.into(),
            bound,
        }
    }

    /// Name of the joint the error refers to, if any.
    #[must_use]
    pub fn joint(&self) -> Option<&str> {
        match self {
            Self::InvalidMargin(_) => None,
            Self::NonFiniteLimit { joint, .. }
            | Self::InvalidVelocityLimit { joint, .. }
            | Self::InvertedRange { joint, .. } => Some(joint),
        }
    }
}

/// A specialized `Result` type for safety configuration.
pub type SafetyResult<T> = std::result::Result<T, SafetyError>;
