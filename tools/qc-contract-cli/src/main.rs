//! qc-contract: Smart Contract Token CLI

use std::process::ExitCode;

use clap::Parser;
use qc_contract_cli::Cli;
use qc_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env().with_service_name("qc-contract");
    if cli.verbose {
        telemetry = telemetry.with_log_level("debug");
    }
    init_telemetry(&telemetry)?;

    qc_contract_cli::run(cli).await
}
