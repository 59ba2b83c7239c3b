//! `teleopctl replay`: run recorded leader samples through the mapper.
//!
//! Input is one JSON object per line, `{"t": 0.01, "positions": {"l1": 0.5}}`,
//! with `t` optional. Each sample produces one output line,
//! `{"t": 0.01, "command": {"f1": -0.5}}`. Samples without `t` take the
//! open-loop path and skip the limiter.

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use teleop_config::load_mapping_config;
use teleop_mapping::JointMapper;
use teleop_safety::LimiterStats;
use tracing::{debug, info};

use crate::commands::ReplayArgs;
use crate::error::CliError;
use crate::output;

/// One recorded leader sample.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sample {
    #[serde(default)]
    pub t: Option<f64>,
    pub positions: BTreeMap<String, f64>,
}

/// Totals for a finished replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub samples: u64,
    pub limiter: Option<LimiterStats>,
}

pub fn execute(args: &ReplayArgs) -> Result<()> {
    let config = load_mapping_config(&args.config).map_err(CliError::from)?;
    let mut mapper = config.build_mapper().map_err(CliError::from)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(CliError::InputRead)?;
            replay(&mut mapper, BufReader::new(file), &mut out, !args.no_safety)?
        }
        None => replay(&mut mapper, io::stdin().lock(), &mut out, !args.no_safety)?,
    };
    out.flush().map_err(CliError::from)?;

    match summary.limiter {
        Some(stats) => info!(
            samples = summary.samples,
            position_clamps = stats.position_clamps,
            velocity_limits = stats.velocity_limits,
            nan_holds = stats.nan_holds,
            "Replay finished"
        ),
        None => info!(samples = summary.samples, "Replay finished"),
    }
    Ok(())
}

/// Map every sample in `input` and write one command line per sample to `out`.
///
/// With `use_safety` false every sample is mapped open-loop.
pub fn replay<R: BufRead, W: Write>(
    mapper: &mut JointMapper,
    input: R,
    out: &mut W,
    use_safety: bool,
) -> Result<ReplaySummary, CliError> {
    let mut samples: u64 = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(CliError::InputRead)?;
        let line_no = index.saturating_add(1);
        if line.trim().is_empty() {
            continue;
        }

        let sample: Sample = serde_json::from_str(&line)
            .map_err(|e| CliError::invalid_sample(line_no, e.to_string()))?;
        let t = if use_safety { sample.t } else { None };

        let command = mapper.map_joints(&sample.positions, t);
        debug!(line = line_no, joints = command.len(), "Sample mapped");
        output::write_command_line(out, sample.t, &command)?;
        samples = samples.saturating_add(1);
    }

    Ok(ReplaySummary {
        samples,
        limiter: mapper.limiter().map(|l| l.stats()),
    })
}
