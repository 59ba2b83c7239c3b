//! Stateful position and velocity limiter.
//!
//! The limiter sits between the joint mapper and the follower device. Each
//! control tick it clips every commanded joint into its position band and then
//! bounds the step from the previously emitted value by `vel_limit * dt`.
//!
//! # Single-writer discipline
//!
//! The velocity stage compares against the value emitted on the previous tick,
//! so calls must arrive in tick order from one owner. The limiter does no
//! internal locking; share it across threads only behind external mutual
//! exclusion.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::{JointLimits, SafetyConfig};
use crate::error::SafetyResult;
use crate::stats::LimiterStats;

/// Smallest time step (seconds) used for velocity computation.
///
/// Equal or decreasing timestamps are treated as this step instead of
/// dividing by zero or a negative number.
pub const MIN_DT: f64 = 1e-3;

/// Clamps joint commands to their configured bands and rate limits.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use teleop_safety::{SafetyConfig, SafetyLimiter};
///
/// let config = SafetyConfig::builder().vel_limit("f1", 1.0).build()?;
/// let mut limiter = SafetyLimiter::new(config)?;
///
/// let first = limiter.limit(&BTreeMap::from([("f1".to_string(), 0.0)]), 0.0);
/// let second = limiter.limit(&BTreeMap::from([("f1".to_string(), 2.0)]), 0.5);
///
/// assert!((first["f1"] - 0.0).abs() < 1e-12);
/// assert!((second["f1"] - 0.5).abs() < 1e-12);
/// # Ok::<(), teleop_safety::SafetyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SafetyLimiter {
    config: SafetyConfig,
    limits: BTreeMap<String, JointLimits>,
    prev_pos: BTreeMap<String, f64>,
    prev_time: Option<f64>,
    stats: LimiterStats,
}

impl SafetyLimiter {
    /// Create a limiter for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails
    /// [`SafetyConfig::validate`].
    pub fn new(config: SafetyConfig) -> SafetyResult<Self> {
        config.validate()?;
        let limits = config.resolve();

        debug!(
            joints = limits.len(),
            soft_margin = config.soft_margin,
            "Safety limiter created"
        );

        Ok(Self {
            config,
            limits,
            prev_pos: BTreeMap::new(),
            prev_time: None,
            stats: LimiterStats::new(),
        })
    }

    /// Limit a set of joint positions observed at time `t`.
    ///
    /// Returns a map with exactly the joints of `positions`. Joints the
    /// configuration does not mention pass through unbounded.
    pub fn limit(&mut self, positions: &BTreeMap<String, f64>, t: f64) -> BTreeMap<String, f64> {
        let mut limited = positions.clone();
        self.limit_in_place(&mut limited, t);
        limited
    }

    /// Same as [`limit`](Self::limit), writing the limited values back into
    /// `positions`.
    pub fn limit_in_place(&mut self, positions: &mut BTreeMap<String, f64>, t: f64) {
        self.stats.record_call();
        let prev_time = self.prev_time;

        for (joint, q) in positions.iter_mut() {
            *q = self.limit_joint(joint, *q, t, prev_time);
        }

        self.prev_time = Some(t);
    }

    fn limit_joint(&mut self, joint: &str, q: f64, t: f64, prev_time: Option<f64>) -> f64 {
        let limits = self
            .limits
            .get(joint)
            .copied()
            .unwrap_or(JointLimits::UNBOUNDED);
        let prev = self.prev_pos.get(joint).copied();

        // An infinite command survives the clip only on an unbounded side.
        let raw = if q.is_nan() || !limits.clip(q).is_finite() {
            let held = prev.unwrap_or_else(|| limits.clip(0.0));
            warn!(joint, q, held, "Non-finite joint command, holding position");
            self.stats.record_nan_hold();
            held
        } else {
            q
        };

        let mut commanded = limits.clip(raw);
        if commanded < raw || commanded > raw {
            debug!(joint, raw, commanded, "Position clamped");
            self.stats.record_position_clamp();
        }

        if let (Some(prev_time), Some(prev)) = (prev_time, prev) {
            let dt = (t - prev_time).max(MIN_DT);
            let velocity = (commanded - prev) / dt;

            if velocity.abs() > limits.vel_limit {
                let limited = prev + velocity.signum() * limits.vel_limit * dt;
                debug!(
                    joint,
                    velocity,
                    vel_limit = limits.vel_limit,
                    commanded = limited,
                    "Velocity limited"
                );
                self.stats.record_velocity_limit();
                commanded = limited;
            }
        }

        match self.prev_pos.get_mut(joint) {
            Some(slot) => *slot = commanded,
            None => {
                self.prev_pos.insert(joint.to_owned(), commanded);
            }
        }

        commanded
    }

    /// Forget the velocity baseline.
    ///
    /// The next call behaves like the first call on a fresh limiter. Use this
    /// when a teleoperation session (re)starts.
    pub fn reset(&mut self) {
        debug!(joints = self.prev_pos.len(), "Safety limiter reset");
        self.prev_pos.clear();
        self.prev_time = None;
    }

    /// Clear the intervention counters.
    pub fn reset_stats(&mut self) {
        self.stats = LimiterStats::new();
    }

    /// The configuration this limiter enforces.
    #[must_use]
    pub fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Resolved limits for a joint.
    #[must_use]
    pub fn limits_for(&self, joint: &str) -> JointLimits {
        self.limits
            .get(joint)
            .copied()
            .unwrap_or(JointLimits::UNBOUNDED)
    }

    /// Timestamp of the last processed call, if any.
    #[must_use]
    pub fn prev_time(&self) -> Option<f64> {
        self.prev_time
    }

    /// Last emitted position for a joint, if any.
    #[must_use]
    pub fn prev_position(&self, joint: &str) -> Option<f64> {
        self.prev_pos.get(joint).copied()
    }

    /// Intervention counters.
    #[must_use]
    pub fn stats(&self) -> LimiterStats {
        self.stats
    }
}
