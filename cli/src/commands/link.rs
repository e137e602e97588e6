//! `slipway link` — point the local repository at the hosted bare repo.
//!
//! Sets the git transport options the hosting provider needs (self-signed
//! certificate, large first push), swaps `origin` to the hosted repository,
//! and pushes master upstream.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::local_setup;
use crate::infra::command_runner::{SLOW_CMD_TIMEOUT, TokioCommandRunner};

/// Arguments for the link command.
#[derive(Args)]
pub struct LinkArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Run the link command.
///
/// # Errors
///
/// Returns an error on incomplete settings or when a git step fails —
/// most commonly the push, when the server side was never provisioned.
pub async fn run(app: &AppContext, args: &LinkArgs) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    config.validate()?;

    let runner = TokioCommandRunner::new(SLOW_CMD_TIMEOUT);
    let reporter = app.reporter();

    local_setup::link_remote(&runner, &args.path, &config, &reporter).await?;

    if app.is_json() {
        println!(
            "{}",
            serde_json::json!({ "linked": true, "remote": config.git_remote_url() })
        );
    } else {
        app.output
            .success(&format!("Pushed master to {}", config.git_remote_url()));
    }
    Ok(ExitCode::SUCCESS)
}
