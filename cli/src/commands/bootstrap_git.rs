//! `slipway bootstrap-git` — attach the git subdomain to the account.
//!
//! The composite sequence: find the website serving the primary domain,
//! register the `git.` subdomain, ensure the git app exists, then create
//! the website that serves the subdomain over HTTPS. Safe to re-run — a
//! converged account sees no mutations at all.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::bootstrap;
use crate::infra::webfaction::WebfactionClient;

/// Run the bootstrap-git command.
///
/// # Errors
///
/// Returns an error on incomplete settings, login failure, a missing
/// primary website, or a fault in any bootstrap step.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    config.validate()?;

    let api = WebfactionClient::from_config(&config);
    let reporter = app.reporter();

    let outcome = bootstrap::bootstrap_git_domain(&api, &config, &reporter)?;
    app.renderer().bootstrap(&outcome, &config)?;
    Ok(ExitCode::SUCCESS)
}
