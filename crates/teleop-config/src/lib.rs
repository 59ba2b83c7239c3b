//! # teleop-config
//!
//! Loads leader/follower teleoperation config files.
//!
//! A config file is a YAML document with the leader and follower joint lists,
//! an optional per-joint transform and optional safety limits:
//!
//! ```yaml
//! leader:   { joints: [l1, l2] }
//! follower: { joints: [f1, f2] }
//! mapping:  { sign: {f1: -1.0}, scale: {f1: 2.0}, offset: {f1: 0.1} }
//! safety:
//!   position_min: {f1: -1.0}
//!   position_max: {f1: 1.0}
//!   vel_limit:    {f1: 1.0}
//!   soft_margin:  0.05
//! ```
//!
//! Records are validated at load time, so a file that loads always builds a
//! mapper.
//!
//! ## Example
//!
//! ```rust
//! use teleop_config::from_yaml_str;
//!
//! let config = from_yaml_str("leader: {joints: [l1]}\nfollower: {joints: [f1]}\n")?;
//! let mapper = config.build_mapper()?;
//! assert!(!mapper.has_safety());
//! # Ok::<(), teleop_config::ConfigError>(())
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

pub mod document;
pub mod error;
pub mod loader;

pub mod prelude;

pub use document::{ConfigDocument, DeviceSection, MappingSection};
pub use error::{ConfigError, ConfigResult};
pub use loader::{TeleopConfig, from_yaml_str, load_mapping_config};
