//! `slipway teardown` — delete the project's apps from the account.
//!
//! Deletion is best-effort: a server-reported fault on one app is reported
//! and the next app is still attempted. The git app is left alone — it
//! hosts the repositories.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::server_setup;
use crate::infra::command_runner::{SLOW_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::ssh::SshShell;
use crate::infra::webfaction::WebfactionClient;

/// Run the teardown command.
///
/// # Errors
///
/// Returns an error on incomplete settings, login failure, or a transport
/// failure. Per-app deletion faults are reported, not raised.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    config.validate()?;

    let confirmed = app.confirm(
        &format!(
            "Delete apps '{}' and '{}' and everything inside them?",
            config.main_app(),
            config.static_app()
        ),
        false,
    )?;
    if !confirmed {
        app.output.info("Aborted.");
        return Ok(ExitCode::SUCCESS);
    }

    let api = WebfactionClient::from_config(&config);
    let shell = SshShell::new(TokioCommandRunner::new(SLOW_CMD_TIMEOUT), config.ssh_target());
    let reporter = app.reporter();

    let outcomes = server_setup::teardown_apps(&api, &shell, &config, &reporter).await?;
    app.renderer().teardown(&outcomes)?;
    Ok(ExitCode::SUCCESS)
}
