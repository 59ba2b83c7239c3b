//! On-disk layout of a teleoperation config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use teleop_mapping::JointMappingConfig;
use teleop_safety::SafetyConfig;

/// Joint list of one side of the teleoperation pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSection {
    /// Joint names in pairing order.
    pub joints: Vec<String>,
}

/// Per-follower-joint transform overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingSection {
    /// Direction multiplier per follower joint.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sign: BTreeMap<String, f64>,
    /// Gain per follower joint.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scale: BTreeMap<String, f64>,
    /// Offset per follower joint (radians).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub offset: BTreeMap<String, f64>,
}

/// The whole config document.
///
/// Top-level sections other than these four are ignored so a file can carry
/// settings for other parts of a teleoperation stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Leader device joints.
    pub leader: DeviceSection,
    /// Follower device joints.
    pub follower: DeviceSection,
    /// Transform overrides. Absent means identity for every pair.
    #[serde(default)]
    pub mapping: MappingSection,
    /// Safety limits. Absent means no limiter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyConfig>,
}

impl ConfigDocument {
    /// Split the document into the mapping record and the optional safety record.
    #[must_use]
    pub fn into_parts(self) -> (JointMappingConfig, Option<SafetyConfig>) {
        let mapping = JointMappingConfig {
            leader_joints: self.leader.joints,
            follower_joints: self.follower.joints,
            sign: self.mapping.sign,
            scale: self.mapping.scale,
            offset: self.mapping.offset,
        };
        (mapping, self.safety)
    }

    /// Build a document from the two records.
    #[must_use]
    pub fn from_parts(mapping: &JointMappingConfig, safety: Option<&SafetyConfig>) -> Self {
        Self {
            leader: DeviceSection {
                joints: mapping.leader_joints.clone(),
            },
            follower: DeviceSection {
                joints: mapping.follower_joints.clone(),
            },
            mapping: MappingSection {
                sign: mapping.sign.clone(),
                scale: mapping.scale.clone(),
                offset: mapping.offset.clone(),
            },
            safety: safety.cloned(),
        }
    }
}
