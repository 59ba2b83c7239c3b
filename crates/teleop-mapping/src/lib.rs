//! # teleop-mapping
//!
//! Translates leader device joint positions into follower commands.
//!
//! Each follower joint is driven by one leader joint through an affine
//! transform, `follower = sign * scale * leader + offset`, configured per
//! follower joint in a [`JointMappingConfig`]. When the mapper is built with a
//! [`SafetyConfig`](teleop_safety::SafetyConfig) it owns a
//! [`SafetyLimiter`](teleop_safety::SafetyLimiter) and every timed command is
//! sanitized before it is returned.
//!
//! ## Control flow
//!
//! ```text
//! leader positions, t ──▶ affine transform ──▶ SafetyLimiter (if configured and t given) ──▶ command
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use teleop_mapping::prelude::*;
//!
//! let mapping = JointMappingConfig::identity([("leader_elbow", "elbow")])
//!     .with_sign("elbow", -1.0);
//! let safety = SafetyConfig::builder()
//!     .position_limits("elbow", -1.0, 1.0)
//!     .build()?;
//! let mut mapper = JointMapper::new(mapping, Some(safety))?;
//!
//! let leader = BTreeMap::from([("leader_elbow".to_string(), 2.0)]);
//! let cmd = mapper.map_joints(&leader, Some(0.0));
//! assert!((cmd["elbow"] + 0.95).abs() < 1e-12);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod mapper;

pub mod prelude;

pub use config::{DEFAULT_OFFSET, DEFAULT_SCALE, DEFAULT_SIGN, JointMappingConfig};
pub use error::{MappingError, MappingResult};
pub use mapper::{JointMapper, JointPair};
