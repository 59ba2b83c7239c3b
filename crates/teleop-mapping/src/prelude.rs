//! Prelude for teleop-mapping.
//!
//! Re-exports the mapping types along with the safety types needed to build
//! a mapper with a limiter.

pub use crate::config::JointMappingConfig;
pub use crate::error::{MappingError, MappingResult};
pub use crate::mapper::{JointMapper, JointPair};
pub use teleop_safety::{LimiterStats, SafetyConfig, SafetyError, SafetyLimiter};
