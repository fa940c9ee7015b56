//! Linalg CLI: terminal client for the linear-algebra calculator
//!
//! ## Usage
//!
//! ```bash
//! linalg unit-vector --vector '[3,4]'
//! linalg angle --v1 '[1,0]' --v2 '[1,1]'
//! linalg solve --a '[[2,1],[1,3]]' --b '[7,11]'
//! linalg visualize --v1 '[1,2,3]' --mode 2d --json
//! ```

use clap::Parser;
use linalg_cli::{logging, Cli, CliConfig, CliResult, ColorChoice, CommandRunner, Verbosity};
use linalg_ui::transport::HttpTransport;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<bool> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    logging::init(config.verbosity);
    tracing::debug!(base_url = %config.client.base_url, "configuration resolved");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let transport = HttpTransport::new(config.client.base_url.clone());
    let runner = CommandRunner::new(transport, config);
    runtime.block_on(runner.run(&cli.command))
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();
    let client = CliConfig::resolve_client(cli.config.as_deref(), cli.base_url.as_deref())?;

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_client(client))
}
