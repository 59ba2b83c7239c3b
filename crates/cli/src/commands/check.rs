//! `teleopctl check`: load a config and report the resolved mapping.

use anyhow::Result;
use teleop_config::load_mapping_config;
use tracing::info;

use crate::commands::CheckArgs;
use crate::error::CliError;
use crate::output::{self, CheckReport};

pub fn execute(args: &CheckArgs, json: bool) -> Result<()> {
    let config = load_mapping_config(&args.config).map_err(CliError::from)?;
    let mapper = config.build_mapper().map_err(CliError::from)?;

    let report = CheckReport::new(args.config.display().to_string(), &mapper);
    info!(
        pairs = report.pairs.len(),
        safety = report.safety,
        "Config is valid"
    );
    output::print_check_report(&report, json);
    Ok(())
}
