//! FHIR R5 model CLI executable
//!
//! See the `cli` module documentation for detailed usage information.

use anyhow::Context;
use atrius_fhir_model::cli::{init_logging, run_cli, Args};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level).context("failed to install the log subscriber")?;
    let command = format!("{:?}", args.command);
    run_cli(args).with_context(|| format!("atrius-model-cli failed: {command}"))?;
    Ok(())
}
