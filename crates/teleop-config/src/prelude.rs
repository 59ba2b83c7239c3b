//! Prelude for teleop-config.

pub use crate::error::{ConfigError, ConfigResult};
pub use crate::loader::{TeleopConfig, from_yaml_str, load_mapping_config};
pub use teleop_mapping::{JointMapper, JointMappingConfig};
pub use teleop_safety::SafetyConfig;
