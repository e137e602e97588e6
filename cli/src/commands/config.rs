//! `slipway config` — show, materialize, and locate settings.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore as _;
use crate::infra::assets::asset_text;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show resolved settings (password never printed)
    Show,
    /// Write a sample settings file to edit
    Init,
    /// Print the settings file location
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or written.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show(app),
        ConfigCommand::Init => init(app),
        ConfigCommand::Path => path(app),
    }
}

fn show(app: &AppContext) -> Result<ExitCode> {
    let (config, path) = app.load_config()?;
    app.renderer().config(&config, &path)?;
    Ok(ExitCode::SUCCESS)
}

fn init(app: &AppContext) -> Result<ExitCode> {
    let target = init_target();
    if target.exists() {
        let overwrite = app.confirm(
            &format!("{} already exists. Overwrite it?", target.display()),
            false,
        )?;
        if !overwrite {
            app.output.info("Keeping the existing file.");
            return Ok(ExitCode::SUCCESS);
        }
    }
    let sample = asset_text("slipway.sample.yaml")?;
    app.config_store.write_text(&target, sample)?;
    app.output.success(&format!("Wrote {}", target.display()));
    app.output.info("Edit it, then run: slipway check");
    Ok(ExitCode::SUCCESS)
}

fn path(app: &AppContext) -> Result<ExitCode> {
    let path = app.config_store.path()?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

/// Where `config init` writes: the explicit override when set, otherwise a
/// project-local file that the load path will then prefer.
fn init_target() -> PathBuf {
    match std::env::var("SLIPWAY_CONFIG") {
        Ok(val) => PathBuf::from(val),
        Err(_) => PathBuf::from("slipway.yaml"),
    }
}
