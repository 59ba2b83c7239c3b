//! Tests for loading config files from disk.

use std::collections::BTreeMap;
use std::io::Write;

use teleop_config::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const SO_ARM_YAML: &str = "\
leader:
  joints: [shoulder_pan, shoulder_lift, elbow_flex, wrist_flex, gripper]
follower:
  joints: [pan, lift, elbow, wrist, gripper]
mapping:
  sign: {pan: -1.0, wrist: -1.0}
  scale: {gripper: 0.5}
  offset: {lift: 0.2}
safety:
  position_min: {pan: -1.5, lift: -1.0, elbow: -2.0, wrist: -1.7, gripper: 0.0}
  position_max: {pan: 1.5, lift: 1.8, elbow: 1.6, wrist: 1.7, gripper: 1.0}
  vel_limit: {pan: 2.0, lift: 2.0, elbow: 2.0, wrist: 3.0}
  soft_margin: 0.02
";

fn joint(map: &BTreeMap<String, f64>, name: &str) -> Result<f64, String> {
    map.get(name)
        .copied()
        .ok_or_else(|| format!("missing joint {name}"))
}

#[test]
fn test_load_from_file_and_drive_mapper() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(SO_ARM_YAML.as_bytes())?;

    let config = load_mapping_config(file.path())?;
    assert_eq!(config.mapping.len(), 5);

    let mut mapper = config.build_mapper()?;
    let leader: BTreeMap<String, f64> = [
        ("shoulder_pan", 0.3),
        ("shoulder_lift", 0.0),
        ("elbow_flex", 0.0),
        ("wrist_flex", 0.0),
        ("gripper", 4.0),
    ]
    .into_iter()
    .map(|(name, q)| (name.to_string(), q))
    .collect();

    let cmd = mapper.map_joints(&leader, Some(0.0));
    assert!((joint(&cmd, "pan")? + 0.3).abs() < 1e-12);
    assert!((joint(&cmd, "lift")? - 0.2).abs() < 1e-12);
    // 0.5 * 4.0 = 2.0 is clamped to 1.0 - 0.02.
    assert!((joint(&cmd, "gripper")? - 0.98).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_missing_file_reports_path() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("arm.yaml");

    let err = load_mapping_config(&path).err().ok_or("expected an error")?;
    assert!(matches!(&err, ConfigError::Io { path: reported, .. } if *reported == path));
    assert!(err.to_string().contains("arm.yaml"));
    Ok(())
}

#[test]
fn test_save_then_load() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("saved.yaml");

    let mapping = JointMappingConfig::identity([("l1", "f1")]).with_scale("f1", 1.5);
    let safety = SafetyConfig::builder().vel_limit("f1", 0.5).build()?;
    let config = TeleopConfig::new(mapping, Some(safety))?;
    config.save(&path)?;

    assert_eq!(load_mapping_config(&path)?, config);
    Ok(())
}

#[test]
fn test_resolved_pairs_snapshot() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(SO_ARM_YAML.as_bytes())?;
    let mapper = load_mapping_config(file.path())?.build_mapper()?;

    let pairs: Vec<String> = mapper
        .pairs()
        .iter()
        .map(|p| format!("{} -> {}: gain={} offset={}", p.leader, p.follower, p.gain, p.offset))
        .collect();

    insta::assert_snapshot!(pairs.join("\n"), @r"
    shoulder_pan -> pan: gain=-1 offset=0
    shoulder_lift -> lift: gain=1 offset=0.2
    elbow_flex -> elbow: gain=1 offset=0
    wrist_flex -> wrist: gain=-1 offset=0
    gripper -> gripper: gain=0.5 offset=0
    ");
    Ok(())
}
