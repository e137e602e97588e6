//! `slipway websites` — observed website records.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ControlPlane;
use crate::infra::webfaction::WebfactionClient;

/// Websites subcommands.
#[derive(Subcommand)]
pub enum WebsitesCommand {
    /// List websites on the account
    List,
}

/// Run the websites command.
///
/// # Errors
///
/// Returns an error on login failure, capability miss, or a listing fault.
pub fn run(app: &AppContext, cmd: WebsitesCommand) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    let api = WebfactionClient::from_config(&config);
    match cmd {
        WebsitesCommand::List => {
            let sites = api.list_websites()?;
            app.renderer().websites(&sites)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
