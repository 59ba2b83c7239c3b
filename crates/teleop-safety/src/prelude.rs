//! Prelude for teleop-safety.
//!
//! ```rust
//! use teleop_safety::prelude::*;
//!
//! let limiter = SafetyLimiter::new(SafetyConfig::default());
//! assert!(limiter.is_ok());
//! ```

pub use crate::config::{DEFAULT_SOFT_MARGIN, JointLimits, SafetyConfig, SafetyConfigBuilder};
pub use crate::error::{SafetyError, SafetyResult};
pub use crate::limiter::{MIN_DT, SafetyLimiter};
pub use crate::stats::LimiterStats;
