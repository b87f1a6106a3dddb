//! Rental marketplace conformance harness
//!
//! Runs the fixed end-to-end scenario against the marketplace API and exits
//! 0 when every check passed, 1 otherwise.

use clap::Parser;
use conformance::cli;
use conformance::commands::RunArgs;
use conformance::common::logging;

#[derive(Parser)]
#[command(name = "conformance", about = "Black-box conformance run for the rental marketplace API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: RunArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.args.verbose);

    match cli::dispatch(cli.args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
