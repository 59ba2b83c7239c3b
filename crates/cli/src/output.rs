//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Write;

use teleop_mapping::JointMapper;

/// One resolved joint pair with its safety band, as reported by `check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub leader: String,
    pub follower: String,
    pub gain: f64,
    pub offset: f64,
    /// Lower bound after the soft margin, `None` when unbounded.
    pub lower: Option<f64>,
    /// Upper bound after the soft margin, `None` when unbounded.
    pub upper: Option<f64>,
    /// Velocity limit, `None` when unlimited.
    pub vel_limit: Option<f64>,
}

/// Summary of a loaded config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub config: String,
    pub safety: bool,
    pub soft_margin: Option<f64>,
    pub pairs: Vec<PairReport>,
}

impl CheckReport {
    pub fn new(config: impl Into<String>, mapper: &JointMapper) -> Self {
        let limiter = mapper.limiter();
        let pairs = mapper
            .pairs()
            .iter()
            .map(|pair| {
                let limits = limiter.map(|l| l.limits_for(&pair.follower));
                PairReport {
                    leader: pair.leader.clone(),
                    follower: pair.follower.clone(),
                    gain: pair.gain,
                    offset: pair.offset,
                    lower: limits.map(|l| l.lower).filter(|v| v.is_finite()),
                    upper: limits.map(|l| l.upper).filter(|v| v.is_finite()),
                    vel_limit: limits.map(|l| l.vel_limit).filter(|v| v.is_finite()),
                }
            })
            .collect();

        Self {
            config: config.into(),
            safety: limiter.is_some(),
            soft_margin: limiter.map(|l| l.config().soft_margin),
            pairs,
        }
    }
}

fn error_json(error: &Error) -> serde_json::Value {
    json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    })
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    match serde_json::to_string_pretty(&error_json(error)) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error as a single JSON line on stderr.
///
/// Used when stdout carries a JSON-lines stream that must stay parseable.
pub fn eprint_error_json_line(error: &Error) {
    match serde_json::to_string(&error_json(error)) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the result of `check`
pub fn print_check_report(report: &CheckReport, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "report": report
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format check report as JSON: {e}"),
        }
        return;
    }

    println!("{} {}", "Config:".bold(), report.config);
    if report.pairs.is_empty() {
        println!("{}", "No joint pairs configured".yellow());
    } else {
        println!("{} ({})", "Joint pairs".bold(), report.pairs.len());
        for pair in &report.pairs {
            print_pair_human(pair);
        }
    }

    match report.soft_margin {
        Some(margin) => println!("{} enabled (soft margin {margin})", "Safety:".bold()),
        None => println!("{} {}", "Safety:".bold(), "disabled".yellow()),
    }
}

fn print_pair_human(pair: &PairReport) {
    println!(
        "  {} {} {}  gain={} offset={}",
        pair.leader.cyan(),
        "->".dimmed(),
        pair.follower.cyan(),
        pair.gain,
        pair.offset
    );

    if pair.lower.is_some() || pair.upper.is_some() || pair.vel_limit.is_some() {
        println!(
            "    band=[{}, {}] vel<={}",
            format_bound(pair.lower, "-inf"),
            format_bound(pair.upper, "inf"),
            format_bound(pair.vel_limit, "inf")
        );
    }
}

fn format_bound(value: Option<f64>, unbounded: &str) -> String {
    value.map_or_else(|| unbounded.to_string(), |v| v.to_string())
}

/// One follower command written by `replay`.
#[derive(Debug, Serialize)]
pub struct CommandLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    pub command: &'a BTreeMap<String, f64>,
}

/// Write one follower command as a JSON line.
pub fn write_command_line<W: Write>(
    out: &mut W,
    t: Option<f64>,
    command: &BTreeMap<String, f64>,
) -> Result<(), crate::error::CliError> {
    serde_json::to_writer(&mut *out, &CommandLine { t, command })?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teleop_mapping::JointMappingConfig;
    use teleop_safety::SafetyConfig;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn check_report_includes_bands() -> TestResult {
        let mapping = JointMappingConfig::identity([("l1", "f1"), ("l2", "f2")]);
        let safety = SafetyConfig::builder()
            .position_limits("f1", -1.0, 1.0)
            .soft_margin(0.1)
            .build()?;
        let mapper = JointMapper::new(mapping, Some(safety))?;

        let report = CheckReport::new("arm.yaml", &mapper);
        assert!(report.safety);
        assert_eq!(report.pairs.len(), 2);

        let f1 = report.pairs.first().ok_or("no pairs")?;
        assert!((f1.upper.ok_or("unbounded")? - 0.9).abs() < 1e-12);
        assert!(f1.vel_limit.is_none());

        let f2 = report.pairs.get(1).ok_or("missing second pair")?;
        assert!(f2.lower.is_none() && f2.upper.is_none());
        Ok(())
    }

    #[test]
    fn check_report_without_safety() -> TestResult {
        let mapper = JointMapper::new(JointMappingConfig::identity([("l1", "f1")]), None)?;
        let report = CheckReport::new("arm.yaml", &mapper);
        assert!(!report.safety);
        assert!(report.soft_margin.is_none());
        Ok(())
    }

    #[test]
    fn error_json_is_a_single_object() -> TestResult {
        let err = anyhow::anyhow!("line one\nline two");
        let line = serde_json::to_string(&error_json(&err))?;
        assert!(!line.contains('\n'));
        assert_eq!(line, r#"{"error":{"message":"line one\nline two"},"success":false}"#);
        Ok(())
    }

    #[test]
    fn command_line_is_one_json_object() -> TestResult {
        let command = BTreeMap::from([("f1".to_string(), 0.5)]);
        let mut out = Vec::new();
        write_command_line(&mut out, Some(0.25), &command)?;
        assert_eq!(String::from_utf8(out)?, "{\"t\":0.25,\"command\":{\"f1\":0.5}}\n");

        let mut out = Vec::new();
        write_command_line(&mut out, None, &command)?;
        assert_eq!(String::from_utf8(out)?, "{\"command\":{\"f1\":0.5}}\n");
        Ok(())
    }
}
