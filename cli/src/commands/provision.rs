//! `slipway provision` — create the project's apps and prepare the server.
//!
//! Fail-fast on creation faults, convergent on re-runs: apps that already
//! exist are left alone, and every remote step is guarded so repeating the
//! command never clobbers prior work. `--fresh` deletes the main and static
//! apps and wipes the hosted repository before rebuilding.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::server_setup;
use crate::infra::command_runner::{SLOW_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::ssh::SshShell;
use crate::infra::webfaction::WebfactionClient;

/// Arguments for the provision command.
#[derive(Args)]
pub struct ProvisionArgs {
    /// Delete existing apps and the hosted repository first
    #[arg(long)]
    pub fresh: bool,
}

/// Run the provision command.
///
/// # Errors
///
/// Returns an error on incomplete settings, login failure, a creation
/// fault, or a failed remote setup step.
pub async fn run(app: &AppContext, args: &ProvisionArgs) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    config.validate()?;

    if args.fresh {
        let confirmed = app.confirm(
            &format!(
                "A fresh install deletes apps '{}' and '{}' and wipes the hosted repository. Continue?",
                config.main_app(),
                config.static_app()
            ),
            false,
        )?;
        if !confirmed {
            app.output.info("Aborted.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let api = WebfactionClient::from_config(&config);
    let shell = SshShell::new(TokioCommandRunner::new(SLOW_CMD_TIMEOUT), config.ssh_target());
    let reporter = app.reporter();

    let setup = server_setup::provision_server(&api, &shell, &config, &reporter, args.fresh).await?;
    app.renderer().server_setup(&setup, &config)?;
    Ok(ExitCode::SUCCESS)
}
