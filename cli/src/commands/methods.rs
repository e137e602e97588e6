//! `slipway methods` — the capability snapshot.
//!
//! Shows every method the control plane advertises. Calls the client
//! refuses locally (capability misses) can be diagnosed against this list.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ControlPlane;
use crate::infra::webfaction::WebfactionClient;

/// Run the methods command.
///
/// # Errors
///
/// Returns an error on login failure or a transport fault.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    let api = WebfactionClient::from_config(&config);
    let methods = api.advertised_methods()?;
    app.renderer().methods(&methods)?;
    Ok(ExitCode::SUCCESS)
}
