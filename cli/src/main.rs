//! Slipway CLI - Provision and bootstrap sites on WebFaction-style hosting accounts

use std::process::ExitCode;

use clap::Parser;

use slipway_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
