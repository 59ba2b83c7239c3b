//! Safety configuration and resolved per-joint limits.
//!
//! A [`SafetyConfig`] is the sparse, serializable description of the allowed
//! envelope: joints missing from a map are unbounded on that axis. The limiter
//! never reads the sparse maps on the hot path; it resolves them once into
//! [`JointLimits`] values at construction.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{SafetyError, SafetyResult};

/// Default margin (radians) shaved off both ends of every position band.
pub const DEFAULT_SOFT_MARGIN: f64 = 0.05;

fn default_soft_margin() -> f64 {
    DEFAULT_SOFT_MARGIN
}

/// Position and velocity envelope for follower joints.
///
/// # Examples
///
/// ```
/// use teleop_safety::SafetyConfig;
///
/// let config = SafetyConfig::builder()
///     .position_limits("shoulder", -1.0, 1.0)
///     .vel_limit("shoulder", 2.0)
///     .soft_margin(0.1)
///     .build()?;
///
/// let limits = config.limits_for("shoulder");
/// assert!((limits.upper - 0.9).abs() < 1e-12);
/// # Ok::<(), teleop_safety::SafetyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SafetyConfig {
    /// Lower position bound per joint (radians).
    #[serde(default)]
    pub position_min: BTreeMap<String, f64>,
    /// Upper position bound per joint (radians).
    #[serde(default)]
    pub position_max: BTreeMap<String, f64>,
    /// Maximum absolute velocity per joint (rad/s).
    #[serde(default)]
    pub vel_limit: BTreeMap<String, f64>,
    /// Margin subtracted from both ends of every position band (radians).
    #[serde(default = "default_soft_margin")]
    pub soft_margin: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            position_min: BTreeMap::new(),
            position_max: BTreeMap::new(),
            vel_limit: BTreeMap::new(),
            soft_margin: DEFAULT_SOFT_MARGIN,
        }
    }
}

impl SafetyConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> SafetyConfigBuilder {
        SafetyConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the soft margin is not a finite non-negative number,
    /// if any position bound is NaN, if any velocity limit is negative or NaN,
    /// or if any joint's band is empty once the margin is applied.
    pub fn validate(&self) -> SafetyResult<()> {
        if !self.soft_margin.is_finite() || self.soft_margin < 0.0 {
            return Err(SafetyError::InvalidMargin(self.soft_margin));
        }

        // -inf min and +inf max leave that side unbounded. The opposite
        // infinities collapse the band onto a point no joint can reach.
        for (joint, &value) in &self.position_min {
            if value.is_nan() || (value.is_infinite() && value.is_sign_positive()) {
                return Err(SafetyError::non_finite_limit(joint, "min"));
            }
        }
        for (joint, &value) in &self.position_max {
            if value.is_nan() || (value.is_infinite() && value.is_sign_negative()) {
                return Err(SafetyError::non_finite_limit(joint, "max"));
            }
        }

        for (joint, &value) in &self.vel_limit {
            if value.is_nan() || value < 0.0 {
                return Err(SafetyError::invalid_velocity_limit(joint, value));
            }
        }

        for joint in self.position_joints() {
            let limits = self.limits_for(joint);
            if limits.lower > limits.upper {
                return Err(SafetyError::inverted_range(
                    joint,
                    limits.lower,
                    limits.upper,
                ));
            }
        }

        Ok(())
    }

    /// Resolve the effective limits for a joint, falling back to unbounded
    /// for every entry the configuration does not mention.
    #[must_use]
    pub fn limits_for(&self, joint: &str) -> JointLimits {
        let min = self
            .position_min
            .get(joint)
            .copied()
            .unwrap_or(f64::NEG_INFINITY);
        let max = self
            .position_max
            .get(joint)
            .copied()
            .unwrap_or(f64::INFINITY);
        let vel_limit = self.vel_limit.get(joint).copied().unwrap_or(f64::INFINITY);

        JointLimits {
            lower: min + self.soft_margin,
            upper: max - self.soft_margin,
            vel_limit,
        }
    }

    /// Every joint named by at least one map, in name order.
    #[must_use]
    pub fn joints(&self) -> BTreeSet<&str> {
        self.position_joints()
            .chain(self.vel_limit.keys().map(String::as_str))
            .collect()
    }

    /// Build the dense lookup table used by the limiter.
    #[must_use]
    pub fn resolve(&self) -> BTreeMap<String, JointLimits> {
        self.joints()
            .into_iter()
            .map(|joint| (joint.to_owned(), self.limits_for(joint)))
            .collect()
    }

    fn position_joints(&self) -> impl Iterator<Item = &str> {
        self.position_min
            .keys()
            .chain(self.position_max.keys())
            .map(String::as_str)
    }
}

/// Builder for [`SafetyConfig`].
#[derive(Debug, Default)]
pub struct SafetyConfigBuilder {
    config: SafetyConfig,
}

impl SafetyConfigBuilder {
    /// Set both position bounds for a joint.
    #[must_use]
    pub fn position_limits(mut self, joint: impl Into<String>, min: f64, max: f64) -> Self {
        let joint = joint.into();
        self.config.position_min.insert(joint.clone(), min);
        self.config.position_max.insert(joint, max);
        self
    }

    /// Set only the lower position bound for a joint.
    #[must_use]
    pub fn position_min(mut self, joint: impl Into<String>, min: f64) -> Self {
        self.config.position_min.insert(joint.into(), min);
        self
    }

    /// Set only the upper position bound for a joint.
    #[must_use]
    pub fn position_max(mut self, joint: impl Into<String>, max: f64) -> Self {
        self.config.position_max.insert(joint.into(), max);
        self
    }

    /// Set the velocity limit for a joint.
    #[must_use]
    pub fn vel_limit(mut self, joint: impl Into<String>, limit: f64) -> Self {
        self.config.vel_limit.insert(joint.into(), limit);
        self
    }

    /// Set the soft margin.
    #[must_use]
    pub fn soft_margin(mut self, margin: f64) -> Self {
        self.config.soft_margin = margin;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> SafetyResult<SafetyConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Effective limits for a single joint with the soft margin already applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    /// Lowest position the limiter will emit.
    pub lower: f64,
    /// Highest position the limiter will emit.
    pub upper: f64,
    /// Maximum absolute velocity (rad/s).
    pub vel_limit: f64,
}

impl JointLimits {
    /// Limits of a joint the configuration does not mention.
    pub const UNBOUNDED: Self = Self {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
        vel_limit: f64::INFINITY,
    };

    /// Clip a position into `[lower, upper]`.
    ///
    /// Applies the lower bound first and the upper bound second, so this
    /// never panics, unlike [`f64::clamp`].
    #[inline]
    #[must_use]
    pub fn clip(&self, q: f64) -> f64 {
        q.max(self.lower).min(self.upper)
    }

    /// Whether both position bounds are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    /// Whether a velocity limit applies.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.vel_limit.is_finite()
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_default_margin() {
        let config = SafetyConfig::default();
        assert!(close(config.soft_margin, DEFAULT_SOFT_MARGIN));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_limits_for_missing_joint_is_unbounded() {
        let config = SafetyConfig::default();
        let limits = config.limits_for("ghost");
        assert!(limits.lower.is_infinite() && limits.lower < 0.0);
        assert!(limits.upper.is_infinite() && limits.upper > 0.0);
        assert!(!limits.is_bounded());
        assert!(!limits.is_rate_limited());
    }

    #[test]
    fn test_limits_for_applies_margin() -> TestResult {
        let config = SafetyConfig::builder()
            .position_limits("f1", -1.0, 1.0)
            .soft_margin(0.1)
            .build()?;
        let limits = config.limits_for("f1");
        assert!(close(limits.lower, -0.9));
        assert!(close(limits.upper, 0.9));
        assert!(limits.is_bounded());
        Ok(())
    }

    #[test]
    fn test_one_sided_bound() -> TestResult {
        let config = SafetyConfig::builder()
            .position_min("f1", 0.0)
            .soft_margin(0.1)
            .build()?;
        let limits = config.limits_for("f1");
        assert!(close(limits.clip(-5.0), 0.1));
        assert!(close(limits.clip(1e6), 1e6));
        Ok(())
    }

    #[test]
    fn test_clip() {
        let limits = JointLimits {
            lower: -0.9,
            upper: 0.9,
            vel_limit: f64::INFINITY,
        };
        assert!(close(limits.clip(5.0), 0.9));
        assert!(close(limits.clip(-5.0), -0.9));
        assert!(close(limits.clip(0.3), 0.3));
        assert!(close(limits.clip(f64::INFINITY), 0.9));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let result = SafetyConfig::builder()
            .position_limits("f1", -0.05, 0.05)
            .soft_margin(0.1)
            .build();
        assert!(matches!(
            result,
            Err(SafetyError::InvertedRange { ref joint, .. }) if joint == "f1"
        ));
    }

    #[test]
    fn test_validate_rejects_min_above_max() {
        let result = SafetyConfig::builder()
            .position_limits("f1", 1.0, -1.0)
            .soft_margin(0.0)
            .build();
        assert!(matches!(result, Err(SafetyError::InvertedRange { .. })));
    }

    #[test]
    fn test_validate_accepts_degenerate_band() -> TestResult {
        // A band that collapses to a single point is still a valid band.
        let config = SafetyConfig::builder()
            .position_limits("f1", -0.1, 0.1)
            .soft_margin(0.1)
            .build()?;
        let limits = config.limits_for("f1");
        assert!(close(limits.clip(3.0), 0.0));
        Ok(())
    }

    #[test]
    fn test_validate_rejects_bad_margin() {
        for margin in [-0.01, f64::NAN, f64::INFINITY] {
            let result = SafetyConfig::builder().soft_margin(margin).build();
            assert!(matches!(result, Err(SafetyError::InvalidMargin(_))));
        }
    }

    #[test]
    fn test_validate_rejects_nan_bound() {
        let result = SafetyConfig::builder().position_max("f1", f64::NAN).build();
        assert!(matches!(
            result,
            Err(SafetyError::NonFiniteLimit { bound: "max", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unreachable_infinite_bounds() {
        let min = SafetyConfig::builder()
            .position_min("f1", f64::INFINITY)
            .build();
        assert!(matches!(
            min,
            Err(SafetyError::NonFiniteLimit { bound: "min", .. })
        ));

        let max = SafetyConfig::builder()
            .position_max("f1", f64::NEG_INFINITY)
            .build();
        assert!(matches!(
            max,
            Err(SafetyError::NonFiniteLimit { bound: "max", .. })
        ));
    }

    #[test]
    fn test_validate_accepts_unbounded_infinite_bounds() -> Result<(), SafetyError> {
        let config = SafetyConfig::builder()
            .position_min("f1", f64::NEG_INFINITY)
            .position_max("f1", f64::INFINITY)
            .build()?;
        assert!(!config.limits_for("f1").is_bounded());
        Ok(())
    }

    #[test]
    fn test_validate_rejects_negative_velocity_limit() {
        let result = SafetyConfig::builder().vel_limit("f1", -1.0).build();
        assert!(matches!(
            result,
            Err(SafetyError::InvalidVelocityLimit { .. })
        ));
    }

    #[test]
    fn test_resolve_covers_every_named_joint() -> TestResult {
        let config = SafetyConfig::builder()
            .position_limits("a", -1.0, 1.0)
            .vel_limit("b", 0.5)
            .build()?;
        let resolved = config.resolve();
        assert_eq!(resolved.len(), 2);
        let b = resolved.get("b").ok_or("missing joint b")?;
        assert!(close(b.vel_limit, 0.5));
        assert!(!b.is_bounded());
        Ok(())
    }

    #[test]
    fn test_deserialize_defaults() -> TestResult {
        let config: SafetyConfig = serde_json::from_str(r#"{"vel_limit": {"f1": 1.0}}"#)?;
        assert!(config.position_min.is_empty());
        assert!(close(config.soft_margin, DEFAULT_SOFT_MARGIN));
        Ok(())
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let result: Result<SafetyConfig, _> = serde_json::from_str(r#"{"vel_limits": {}}"#);
        assert!(result.is_err());
    }
}
