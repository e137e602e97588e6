//! `slipway init` — set up the local project directory.
//!
//! Creates the virtualenv, a fresh git repository, and a `.gitignore` from
//! the embedded template with the venv directory appended, then makes the
//! initial commit. Replacing an existing `.git` is confirmation-gated.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::local_setup;
use crate::infra::assets::asset_text;
use crate::infra::command_runner::{SLOW_CMD_TIMEOUT, TokioCommandRunner};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Run the init command.
///
/// # Errors
///
/// Returns an error on incomplete settings or a failed local step
/// (virtualenv creation, git init, the initial commit).
pub async fn run(app: &AppContext, args: &InitArgs) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    config.validate()?;

    let wipe_existing = if args.path.join(".git").exists() {
        let replace = app.confirm(
            &format!(
                "{} already holds a git repository. Replace it?",
                args.path.display()
            ),
            false,
        )?;
        if !replace {
            app.output.info("Keeping the existing repository.");
            return Ok(ExitCode::SUCCESS);
        }
        true
    } else {
        false
    };

    let runner = TokioCommandRunner::new(SLOW_CMD_TIMEOUT);
    let reporter = app.reporter();
    let template = asset_text("gitignore")?;

    local_setup::init_project(&runner, &args.path, &config, template, wipe_existing, &reporter)
        .await?;

    if app.is_json() {
        println!(
            "{}",
            serde_json::json!({ "initialized": true, "path": args.path.display().to_string() })
        );
    } else {
        app.output.success("Project initialized.");
        app.output.info("Wire it to the server: slipway link");
    }
    Ok(ExitCode::SUCCESS)
}
