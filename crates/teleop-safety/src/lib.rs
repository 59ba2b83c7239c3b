//! # teleop-safety
//!
//! Safety limiting for teleoperation follower commands.
//!
//! Every control tick the follower command passes through a [`SafetyLimiter`]
//! before it reaches the device. The limiter enforces two envelopes per joint:
//!
//! - **Position**: the command is clipped into
//!   `[position_min + soft_margin, position_max - soft_margin]`.
//! - **Velocity**: the step from the previously emitted command may not exceed
//!   `vel_limit * dt`, with `dt` floored at [`MIN_DT`].
//!
//! Joints the [`SafetyConfig`] does not mention are unbounded. The first sample
//! of a joint is only position-clamped; there is no baseline to rate-limit
//! against until a value has been emitted.
//!
//! ## Error model
//!
//! Configuration defects (inverted bands, negative limits, a bad margin) are
//! rejected when the limiter is built. The per-tick path is infallible and
//! absorbs degenerate samples: repeated or decreasing timestamps fall back to
//! [`MIN_DT`], and NaN positions hold the last emitted value.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use teleop_safety::prelude::*;
//!
//! let config = SafetyConfig::builder()
//!     .position_limits("elbow", -1.0, 1.0)
//!     .vel_limit("elbow", 1.0)
//!     .soft_margin(0.1)
//!     .build()?;
//! let mut limiter = SafetyLimiter::new(config)?;
//!
//! let cmd = BTreeMap::from([("elbow".to_string(), 5.0)]);
//! let out = limiter.limit(&cmd, 0.0);
//! assert!((out["elbow"] - 0.9).abs() < 1e-12);
//! # Ok::<(), SafetyError>(())
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
pub mod limiter;
pub mod stats;

pub mod prelude;

pub use config::{DEFAULT_SOFT_MARGIN, JointLimits, SafetyConfig, SafetyConfigBuilder};
pub use error::{SafetyError, SafetyResult};
pub use limiter::{MIN_DT, SafetyLimiter};
pub use stats::LimiterStats;
