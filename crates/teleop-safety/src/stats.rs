//! Limiter intervention counters.

use serde::{Deserialize, Serialize};

/// How often the limiter had to intervene.
///
/// Counters are monotone and saturating. They survive
/// [`SafetyLimiter::reset`](crate::SafetyLimiter::reset) so a restarted
/// session still reports its history; use
/// [`SafetyLimiter::reset_stats`](crate::SafetyLimiter::reset_stats) to clear them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimiterStats {
    /// Number of `limit` calls.
    pub calls: u64,
    /// Joint samples moved by position clamping.
    pub position_clamps: u64,
    /// Joint samples moved by velocity limiting.
    pub velocity_limits: u64,
    /// NaN or unclippable infinite joint samples replaced by a held value.
    pub nan_holds: u64,
}

impl LimiterStats {
    /// Create empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of joint samples the limiter changed.
    #[must_use]
    pub fn interventions(&self) -> u64 {
        self.position_clamps
            .saturating_add(self.velocity_limits)
            .saturating_add(self.nan_holds)
    }

    pub(crate) fn record_call(&mut self) {
        self.calls = self.calls.saturating_add(1);
    }

    pub(crate) fn record_position_clamp(&mut self) {
        self.position_clamps = self.position_clamps.saturating_add(1);
    }

    pub(crate) fn record_velocity_limit(&mut self) {
        self.velocity_limits = self.velocity_limits.saturating_add(1);
    }

    pub(crate) fn record_nan_hold(&mut self) {
        self.nan_holds = self.nan_holds.saturating_add(1);
    }
}
