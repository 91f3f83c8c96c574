//! Model diagnostics command.

use anyhow::Result;
use clap::Args;
use relic_core::{diagnostics, Config};

use crate::output;

#[derive(Args)]
pub struct DiagnoseArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Never fails because the API is unreachable; that is part of the report.
pub async fn execute(args: DiagnoseArgs, config: Config) -> Result<()> {
    let report = diagnostics::diagnose(&config).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_diagnostic(&report);
    }

    Ok(())
}
