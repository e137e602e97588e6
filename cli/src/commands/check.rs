//! `slipway check` — account diagnostics.
//!
//! Probes, in order: settings completeness, control-plane login, required
//! method advertisement, primary website presence, git subdomain attachment.
//! Exits non-zero when any check fails; warnings (git subdomain not yet
//! attached) keep the exit code at zero.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::diagnose;
use crate::infra::webfaction::WebfactionClient;
use crate::output::progress;

/// Run the check command.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or rendering fails.
/// Remote failures are reported as failed checks, not as errors.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    let api = WebfactionClient::from_config(&config);

    let pb = (app.output.show_progress() && !app.is_json())
        .then(|| progress::spinner("Checking the account..."));
    let diagnosis = diagnose::diagnose(&api, &config);
    if let Some(pb) = pb {
        if diagnosis.healthy() {
            progress::finish_ok(&pb, "Checks complete");
        } else {
            progress::finish_error(&pb, "Problems found");
        }
    }

    app.renderer().diagnosis(&diagnosis)?;
    Ok(if diagnosis.healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
