//! CLI argument definitions
//!
//! Every flag is optional: with none given, the harness performs the fixed
//! run against the discovered base URL.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Base URL of the marketplace backend (overrides config and env file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Deployment env file to read the backend URL from
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(long, short)]
    pub verbose: bool,
}
