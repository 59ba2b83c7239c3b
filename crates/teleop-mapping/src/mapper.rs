//! Leader-to-follower joint mapper.
//!
//! The mapper resolves a [`JointMappingConfig`] once into a dense list of
//! [`JointPair`]s and, when given a [`SafetyConfig`], owns the
//! [`SafetyLimiter`] that sanitizes every timed command.

use std::collections::BTreeMap;

use teleop_safety::{SafetyConfig, SafetyLimiter};
use tracing::{info, trace};

use crate::config::JointMappingConfig;
use crate::error::MappingResult;

/// One resolved leader/follower pair.
///
/// `follower = gain * leader + offset`, where `gain = sign * scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPair {
    /// Leader joint name.
    pub leader: String,
    /// Follower joint name.
    pub follower: String,
    /// Combined sign and scale.
    pub gain: f64,
    /// Additive offset (radians).
    pub offset: f64,
}

impl JointPair {
    /// Apply the affine transform to a leader position.
    #[inline]
    #[must_use]
    pub fn apply(&self, leader_position: f64) -> f64 {
        self.gain * leader_position + self.offset
    }
}

/// Maps leader joint positions to follower commands.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use teleop_mapping::{JointMapper, JointMappingConfig};
///
/// let config = JointMappingConfig::identity([("l1", "f1")])
///     .with_sign("f1", -1.0)
///     .with_scale("f1", 2.0)
///     .with_offset("f1", 0.1);
/// let mut mapper = JointMapper::new(config, None)?;
///
/// let leader = BTreeMap::from([("l1".to_string(), 0.5)]);
/// let cmd = mapper.map_joints(&leader, None);
/// assert!((cmd["f1"] + 0.9).abs() < 1e-12);
/// # Ok::<(), teleop_mapping::MappingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JointMapper {
    pairs: Vec<JointPair>,
    limiter: Option<SafetyLimiter>,
}

impl JointMapper {
    /// Create a mapper, with a safety limiter when `safety` is given.
    ///
    /// # Errors
    ///
    /// Returns an error if either configuration fails validation.
    pub fn new(mapping: JointMappingConfig, safety: Option<SafetyConfig>) -> MappingResult<Self> {
        mapping.validate()?;
        let limiter = safety.map(SafetyLimiter::new).transpose()?;

        let pairs: Vec<JointPair> = mapping
            .leader_joints
            .iter()
            .zip(&mapping.follower_joints)
            .map(|(leader, follower)| JointPair {
                leader: leader.clone(),
                follower: follower.clone(),
                gain: mapping.sign_for(follower) * mapping.scale_for(follower),
                offset: mapping.offset_for(follower),
            })
            .collect();

        info!(
            pairs = pairs.len(),
            safety = limiter.is_some(),
            "Joint mapper created"
        );

        Ok(Self { pairs, limiter })
    }

    /// Map leader positions to a follower command.
    ///
    /// Pairs whose leader joint is missing from `leader_pos` produce no
    /// follower entry. When the mapper owns a limiter and `t` is given, the
    /// command is passed through it. With `t = None` the safety stage is
    /// skipped even if a limiter is configured.
    pub fn map_joints(
        &mut self,
        leader_pos: &BTreeMap<String, f64>,
        t: Option<f64>,
    ) -> BTreeMap<String, f64> {
        let mut command = self.map_raw(leader_pos);

        if let (Some(limiter), Some(t)) = (self.limiter.as_mut(), t) {
            limiter.limit_in_place(&mut command, t);
        }

        command
    }

    /// Apply only the affine transform. Never touches the limiter.
    #[must_use]
    pub fn map_raw(&self, leader_pos: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
        let mut command = BTreeMap::new();

        for pair in &self.pairs {
            match leader_pos.get(&pair.leader) {
                Some(&q) => {
                    command.insert(pair.follower.clone(), pair.apply(q));
                }
                None => trace!(leader = %pair.leader, "Leader joint missing, no command"),
            }
        }

        command
    }

    /// Reset the limiter's velocity baseline, if a limiter is configured.
    pub fn reset(&mut self) {
        if let Some(limiter) = self.limiter.as_mut() {
            limiter.reset();
        }
    }

    /// Resolved joint pairs, in configuration order.
    #[must_use]
    pub fn pairs(&self) -> &[JointPair] {
        &self.pairs
    }

    /// Follower joint names, in configuration order.
    pub fn follower_joints(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|pair| pair.follower.as_str())
    }

    /// Whether a safety limiter is configured.
    #[must_use]
    pub fn has_safety(&self) -> bool {
        self.limiter.is_some()
    }

    /// The owned limiter, if any.
    #[must_use]
    pub fn limiter(&self) -> Option<&SafetyLimiter> {
        self.limiter.as_ref()
    }

    /// Mutable access to the owned limiter, if any.
    pub fn limiter_mut(&mut self) -> Option<&mut SafetyLimiter> {
        self.limiter.as_mut()
    }
}
