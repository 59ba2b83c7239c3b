//! Error types for joint mapping configuration.

use teleop_safety::SafetyError;
use thiserror::Error;

/// Errors raised while building a [`JointMapper`](crate::JointMapper).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// Leader and follower joint lists differ in length.
    #[error("Joint list length mismatch: {leader} leader joints, {follower} follower joints")]
    LengthMismatch {
        /// Number of leader joints.
        leader: usize,
        /// Number of follower joints.
        follower: usize,
    },

    /// A follower joint is the target of more than one pair.
    #[error("Follower joint '{0}' is mapped more than once")]
    DuplicateJoint(String),

    /// A joint name is empty.
    #[error("Empty joint name at index {index} of the {side} joint list")]
    EmptyJointName {
        /// `"leader"` or `"follower"`.
        side: &'static str,
        /// Position in the list.
        index: usize,
    },

    /// A sign, scale or offset entry is NaN or infinite.
    #[error("Non-finite {field} value {value} for joint '{joint}'")]
    NonFinite {
        /// `"sign"`, `"scale"` or `"offset"`.
        field: &'static str,
        /// Follower joint the entry belongs to.
        joint: String,
        /// The rejected value.
        value: f64,
    },

    /// The safety configuration is invalid.
    #[error("Safety configuration error: {0}")]
    Safety(#[from] SafetyError),
}

impl MappingError {
    /// Create a length mismatch error.
    #[must_use]
    pub fn length_mismatch(leader: usize, follower: usize) -> Self {
        Self::LengthMismatch { leader, follower }
    }

    /// Create a non-finite value error.
    #[must_use]
    pub fn non_finite(field: &'static str, joint: impl Into<String>, value: f64) -> Self {
        Self::NonFinite {
            field,
            joint: joint.into(),
            value,
        }
    }
}

/// A specialized `Result` type for mapping configuration.
pub type MappingResult<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MappingError::length_mismatch(3, 2);
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));

        let err = MappingError::non_finite("scale", "f1", f64::INFINITY);
        assert!(err.to_string().contains("scale"));
        assert!(err.to_string().contains("f1"));
    }

    #[test]
    fn test_safety_error_converts() {
        let err: MappingError = SafetyError::InvalidMargin(-1.0).into();
        assert!(matches!(err, MappingError::Safety(_)));
        assert!(err.to_string().contains("soft margin"));
    }
}
