//! Command implementations for teleopctl

pub mod check;
pub mod replay;

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the teleoperation YAML config
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to the teleoperation YAML config
    pub config: PathBuf,

    /// JSON-lines file of leader samples (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Skip the safety limiter and emit the raw affine mapping
    #[arg(long)]
    pub no_safety: bool,
}
