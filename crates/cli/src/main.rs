//! teleopctl - Teleoperation mapping CLI
//!
//! Checks leader/follower mapping configs and replays recorded leader
//! samples through the mapper and safety limiter.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CheckArgs, ReplayArgs};

#[derive(Parser)]
#[command(name = "teleopctl")]
#[command(about = "Teleoperation mapping CLI - Check configs and replay leader recordings")]
#[command(version)]
#[command(long_about = "
teleopctl loads leader/follower teleoperation configs, reports the resolved
joint mapping and safety limits, and replays recorded leader samples through
the same mapper and safety limiter used on the robot.

Replay reads and writes JSON lines. Logs go to stderr.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config and print the resolved joint mapping
    Check(CheckArgs),

    /// Map recorded leader samples to follower commands
    Replay(ReplayArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "teleopctl={log_level},teleop_config={log_level},teleop_mapping={log_level},teleop_safety={log_level}"
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json && matches!(cli.command, Commands::Replay(_)) {
                output::eprint_error_json_line(&e);
            } else if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code_for(&e))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => commands::check::execute(args, cli.json),
        Commands::Replay(args) => commands::replay::execute(args),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
