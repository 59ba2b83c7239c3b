//! Fuzzes the joint mapper with arbitrary leader positions.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_mapper
#![no_main]
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;
use teleop_mapping::{JointMapper, JointMappingConfig};
use teleop_safety::SafetyConfig;

fuzz_target!(|data: &[u8]| {
    let mapping = JointMappingConfig::identity([("l1", "f1"), ("l2", "f2")])
        .with_sign("f1", -1.0)
        .with_scale("f2", 0.5);
    let Ok(safety) = SafetyConfig::builder()
        .position_limits("f1", -1.0, 1.0)
        .vel_limit("f2", 1.0)
        .build()
    else {
        return;
    };
    let Ok(mut mapper) = JointMapper::new(mapping, Some(safety)) else {
        return;
    };

    for (tick, chunk) in data.chunks_exact(16).enumerate() {
        let (a, b) = chunk.split_at(8);
        let (Ok(a), Ok(b)) = (a.try_into(), b.try_into()) else {
            return;
        };
        let leader = BTreeMap::from([
            ("l1".to_string(), f64::from_le_bytes(a)),
            ("l2".to_string(), f64::from_le_bytes(b)),
        ]);

        let t = (tick % 7 != 0).then_some(tick as f64 * 0.01);
        let command = mapper.map_joints(&leader, t);
        assert_eq!(command.len(), 2);
    }
});
