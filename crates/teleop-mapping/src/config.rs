//! Joint mapping configuration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::error::{MappingError, MappingResult};

/// Sign applied to follower joints without an explicit entry.
pub const DEFAULT_SIGN: f64 = 1.0;
/// Scale applied to follower joints without an explicit entry.
pub const DEFAULT_SCALE: f64 = 1.0;
/// Offset applied to follower joints without an explicit entry.
pub const DEFAULT_OFFSET: f64 = 0.0;

/// Positional pairing of leader joints to follower joints and the per-joint
/// affine transform between them.
///
/// Index `i` of `leader_joints` drives index `i` of `follower_joints`. The
/// `sign`, `scale` and `offset` maps are keyed by follower joint name.
///
/// # Examples
///
/// ```
/// use teleop_mapping::JointMappingConfig;
///
/// let config = JointMappingConfig::identity([("l1", "f1"), ("l2", "f2")]);
/// assert_eq!(config.len(), 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JointMappingConfig {
    /// Leader joint names, in pairing order.
    pub leader_joints: Vec<String>,
    /// Follower joint names, in pairing order.
    pub follower_joints: Vec<String>,
    /// Direction multiplier per follower joint, usually `+1.0` or `-1.0`.
    #[serde(default)]
    pub sign: BTreeMap<String, f64>,
    /// Gain per follower joint.
    #[serde(default)]
    pub scale: BTreeMap<String, f64>,
    /// Additive offset per follower joint (radians).
    #[serde(default)]
    pub offset: BTreeMap<String, f64>,
}

impl JointMappingConfig {
    /// Build a configuration pairing each leader with a follower, with no
    /// sign, scale or offset overrides.
    #[must_use]
    pub fn identity<L, F>(pairs: impl IntoIterator<Item = (L, F)>) -> Self
    where
        L: Into<String>,
        F: Into<String>,
    {
        let (leader_joints, follower_joints) = pairs
            .into_iter()
            .map(|(leader, follower)| (leader.into(), follower.into()))
            .unzip();

        Self {
            leader_joints,
            follower_joints,
            ..Self::default()
        }
    }

    /// Set the sign for a follower joint.
    #[must_use]
    pub fn with_sign(mut self, follower: impl Into<String>, sign: f64) -> Self {
        self.sign.insert(follower.into(), sign);
        self
    }

    /// Set the scale for a follower joint.
    #[must_use]
    pub fn with_scale(mut self, follower: impl Into<String>, scale: f64) -> Self {
        self.scale.insert(follower.into(), scale);
        self
    }

    /// Set the offset for a follower joint.
    #[must_use]
    pub fn with_offset(mut self, follower: impl Into<String>, offset: f64) -> Self {
        self.offset.insert(follower.into(), offset);
        self
    }

    /// Number of follower joints.
    ///
    /// Equals the number of leader/follower pairs once [`validate`](Self::validate)
    /// has accepted the configuration.
    #[must_use]
    pub fn len(&self) -> usize {
        self.follower_joints.len()
    }

    /// Whether the configuration maps no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sign for a follower joint, `+1.0` when absent.
    #[must_use]
    pub fn sign_for(&self, follower: &str) -> f64 {
        self.sign.get(follower).copied().unwrap_or(DEFAULT_SIGN)
    }

    /// Scale for a follower joint, `1.0` when absent.
    #[must_use]
    pub fn scale_for(&self, follower: &str) -> f64 {
        self.scale.get(follower).copied().unwrap_or(DEFAULT_SCALE)
    }

    /// Offset for a follower joint, `0.0` when absent.
    #[must_use]
    pub fn offset_for(&self, follower: &str) -> f64 {
        self.offset.get(follower).copied().unwrap_or(DEFAULT_OFFSET)
    }

    /// Validate the configuration.
    ///
    /// Leader names may repeat, so one leader joint can drive several
    /// followers. Follower names may not.
    ///
    /// # Errors
    ///
    /// Returns an error if the joint lists differ in length, if a joint name
    /// is empty, if a follower joint appears twice, or if any sign, scale or
    /// offset entry is not finite.
    pub fn validate(&self) -> MappingResult<()> {
        if self.leader_joints.len() != self.follower_joints.len() {
            return Err(MappingError::length_mismatch(
                self.leader_joints.len(),
                self.follower_joints.len(),
            ));
        }

        if let Some(index) = self.leader_joints.iter().position(String::is_empty) {
            return Err(MappingError::EmptyJointName {
                side: "leader",
                index,
            });
        }
        if let Some(index) = self.follower_joints.iter().position(String::is_empty) {
            return Err(MappingError::EmptyJointName {
                side: "follower",
                index,
            });
        }

        let mut seen = BTreeSet::new();
        for follower in &self.follower_joints {
            if !seen.insert(follower.as_str()) {
                return Err(MappingError::DuplicateJoint(follower.clone()));
            }
        }

        for (field, map) in [
            ("sign", &self.sign),
            ("scale", &self.scale),
            ("offset", &self.offset),
        ] {
            if let Some((joint, &value)) = map.iter().find(|(_, v)| !v.is_finite()) {
                return Err(MappingError::non_finite(field, joint, value));
            }
        }

        for (joint, sign) in &self.sign {
            if (sign.abs() - 1.0).abs() > f64::EPSILON {
                warn!(joint = %joint, sign, "Sign is not +1 or -1; it will also scale the joint");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_defaults_for_missing_entries() {
        let config = JointMappingConfig::identity([("l1", "f1")]);
        assert!(close(config.sign_for("f1"), 1.0));
        assert!(close(config.scale_for("f1"), 1.0));
        assert!(close(config.offset_for("f1"), 0.0));
    }

    #[test]
    fn test_with_overrides() {
        let config = JointMappingConfig::identity([("l1", "f1")])
            .with_sign("f1", -1.0)
            .with_scale("f1", 2.0)
            .with_offset("f1", 0.1);
        assert!(close(config.sign_for("f1"), -1.0));
        assert!(close(config.scale_for("f1"), 2.0));
        assert!(close(config.offset_for("f1"), 0.1));
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let config = JointMappingConfig {
            leader_joints: vec!["l1".into(), "l2".into()],
            follower_joints: vec!["f1".into()],
            ..JointMappingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(MappingError::length_mismatch(2, 1))
        );
    }

    #[test]
    fn test_len_counts_followers_even_when_lists_disagree() {
        let config = JointMappingConfig {
            leader_joints: vec!["l1".into()],
            follower_joints: vec!["f1".into(), "f2".into(), "f3".into()],
            ..JointMappingConfig::default()
        };
        assert_eq!(config.len(), 3);
        assert!(!config.is_empty());
        assert!(matches!(
            config.validate(),
            Err(MappingError::LengthMismatch { leader: 1, follower: 3 })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_follower() {
        let config = JointMappingConfig::identity([("l1", "f1"), ("l2", "f1")]);
        assert_eq!(
            config.validate(),
            Err(MappingError::DuplicateJoint("f1".into()))
        );
    }

    #[test]
    fn test_validate_allows_shared_leader() {
        let config = JointMappingConfig::identity([("l1", "f1"), ("l1", "f2")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let config = JointMappingConfig::identity([("l1", "f1"), ("", "f2")]);
        assert_eq!(
            config.validate(),
            Err(MappingError::EmptyJointName {
                side: "leader",
                index: 1
            })
        );
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = JointMappingConfig::identity([("l1", "f1")]).with_offset("f1", f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(MappingError::NonFinite { field: "offset", .. })
        ));
    }

    #[test]
    fn test_validate_accepts_unusual_sign() {
        let config = JointMappingConfig::identity([("l1", "f1")]).with_sign("f1", 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = JointMappingConfig::default();
        assert!(config.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config: JointMappingConfig =
            serde_json::from_str(r#"{"leader_joints": ["l1"], "follower_joints": ["f1"]}"#)?;
        assert!(config.sign.is_empty());
        assert_eq!(config.len(), 1);
        Ok(())
    }
}
