//! CLI run handling
//!
//! Resolves configuration, builds the executor and drives one full run.

use colored::Colorize;

use crate::commands::RunArgs;
use crate::common::config::Config;
use crate::common::Result;
use crate::harness;
use crate::http::{Executor, ReqwestTransport};

/// Perform one run. `Ok(true)` means every check passed.
pub async fn dispatch(args: RunArgs) -> Result<bool> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(url) = args.base_url {
        config.target.base_url = Some(url);
    }
    if let Some(path) = args.env_file {
        config.target.env_file = path;
    }
    if let Some(secs) = args.timeout {
        config.timeouts.request_secs = secs;
    }

    let base_url = config.base_url()?;
    let api_url = config.api_url(&base_url);

    println!("\n{}", "RENTAL MARKETPLACE BACKEND API TESTING".bold());
    println!("Backend URL: {}", base_url);
    println!("API Base: {}", api_url);
    tracing::debug!(timeout_secs = config.timeouts.request_secs, "Request timeout");

    let transport = ReqwestTransport::new(config.timeouts.request())?;
    let executor = Executor::new(api_url, Box::new(transport));

    let report = harness::run_scenario(&executor).await?;
    report.print_summary();

    if let Some(path) = &args.report {
        report.write_json(path)?;
        tracing::info!(path = %path.display(), "Report written");
    }

    Ok(report.is_success())
}
