//! Fuzzes the safety limiter with arbitrary position and time sequences.
//!
//! Every emitted position must stay inside the joint band, and consecutive
//! emitted positions must respect the velocity limit.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_limiter
#![no_main]
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;
use teleop_safety::{MIN_DT, SafetyConfig, SafetyLimiter};

fuzz_target!(|data: &[u8]| {
    let Ok(config) = SafetyConfig::builder()
        .position_limits("j", -1.0, 1.0)
        .vel_limit("j", 2.0)
        .soft_margin(0.05)
        .build()
    else {
        return;
    };
    let Ok(mut limiter) = SafetyLimiter::new(config) else {
        return;
    };

    let mut prev: Option<(f64, f64)> = None;
    for chunk in data.chunks_exact(16) {
        let (t_bytes, q_bytes) = chunk.split_at(8);
        let (Ok(t_bytes), Ok(q_bytes)) = (t_bytes.try_into(), q_bytes.try_into()) else {
            return;
        };
        let t = f64::from_le_bytes(t_bytes);
        let q = f64::from_le_bytes(q_bytes);
        if !t.is_finite() {
            continue;
        }

        let out = limiter.limit(&BTreeMap::from([("j".to_string(), q)]), t);
        let Some(&emitted) = out.get("j") else {
            return;
        };
        assert!((-0.95..=0.95).contains(&emitted));

        if let Some((prev_t, prev_q)) = prev {
            let dt = (t - prev_t).max(MIN_DT);
            assert!((emitted - prev_q).abs() <= 2.0 * dt + 1e-9);
        }
        prev = Some((t, emitted));
    }
});
