//! Fuzzes the YAML config loader with arbitrary documents.
//!
//! Any document that loads must also build a mapper.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_config_yaml
#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(config) = teleop_config::from_yaml_str(text) {
        assert!(config.build_mapper().is_ok());
        if let Ok(yaml) = config.to_yaml_string() {
            let _ = teleop_config::from_yaml_str(&yaml);
        }
    }
});
