//! `slipway apps` — operator access to application slots.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ControlPlane;
use crate::application::services::lifecycle::{self, CreateOutcome, DeleteOutcome};
use crate::domain::config::{SlipwayConfig, valid_app_name};
use crate::domain::error::ConfigError;
use crate::infra::command_runner::{SLOW_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::ssh::SshShell;
use crate::infra::webfaction::WebfactionClient;

/// Apps subcommands.
#[derive(Subcommand)]
pub enum AppsCommand {
    /// List application slots on the account
    List,
    /// Create an app slot if it does not exist
    Ensure {
        /// App slot name
        name: String,
        /// App type on the control plane
        #[arg(long)]
        kind: String,
        /// Type-specific extra settings (for git apps, the shared secret)
        #[arg(long, default_value = "")]
        extra: String,
    },
    /// Delete an app slot if it exists
    Remove {
        /// App slot name
        name: String,
    },
}

/// Run the apps command.
///
/// # Errors
///
/// Returns an error on login failure, capability miss, or a creation
/// fault. Deletion faults are reported as warnings, not errors.
pub async fn run(app: &AppContext, cmd: AppsCommand) -> Result<ExitCode> {
    let (config, _path) = app.load_config()?;
    let api = WebfactionClient::from_config(&config);
    match cmd {
        AppsCommand::List => list(app, &api),
        AppsCommand::Ensure { name, kind, extra } => ensure(app, &api, &name, &kind, &extra),
        AppsCommand::Remove { name } => remove(app, &api, &config, &name).await,
    }
}

fn list(app: &AppContext, api: &impl ControlPlane) -> Result<ExitCode> {
    let apps = api.list_apps()?;
    app.renderer().apps(&apps)?;
    Ok(ExitCode::SUCCESS)
}

fn ensure(
    app: &AppContext,
    api: &impl ControlPlane,
    name: &str,
    kind: &str,
    extra: &str,
) -> Result<ExitCode> {
    if !valid_app_name(name) {
        anyhow::bail!(ConfigError::InvalidAppName {
            name: name.to_string()
        });
    }
    let outcome = lifecycle::ensure_app_created(api, name, kind, extra)?;
    if app.is_json() {
        let label = match outcome {
            CreateOutcome::Created(_) => "created",
            CreateOutcome::AlreadyExists => "present",
        };
        println!(
            "{}",
            serde_json::json!({ "app": name, "outcome": label })
        );
        return Ok(ExitCode::SUCCESS);
    }
    match outcome {
        CreateOutcome::Created(created) => {
            app.output
                .success(&format!("Created app '{}' ({})", created.name, created.kind));
        }
        CreateOutcome::AlreadyExists => {
            app.output
                .info(&format!("App '{name}' already exists; nothing to do."));
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn remove(
    app: &AppContext,
    api: &impl ControlPlane,
    config: &SlipwayConfig,
    name: &str,
) -> Result<ExitCode> {
    let confirmed = app.confirm(
        &format!("Delete app '{name}' and everything inside it?"),
        false,
    )?;
    if !confirmed {
        app.output.info("Aborted.");
        return Ok(ExitCode::SUCCESS);
    }

    let runner = TokioCommandRunner::new(SLOW_CMD_TIMEOUT);
    let shell = SshShell::new(runner, config.ssh_target());
    let outcome = lifecycle::ensure_app_deleted(api, &shell, name).await?;
    if app.is_json() {
        let value = match &outcome {
            DeleteOutcome::Deleted => serde_json::json!({ "app": name, "outcome": "deleted" }),
            DeleteOutcome::NotPresent => {
                serde_json::json!({ "app": name, "outcome": "not-present" })
            }
            DeleteOutcome::Failed { reason } => {
                serde_json::json!({ "app": name, "outcome": "failed", "reason": reason })
            }
        };
        println!("{value}");
        return Ok(ExitCode::SUCCESS);
    }
    match outcome {
        DeleteOutcome::Deleted => app.output.success(&format!("Deleted app '{name}'")),
        DeleteOutcome::NotPresent => app
            .output
            .info(&format!("App '{name}' does not exist; nothing to do.")),
        DeleteOutcome::Failed { reason } => app
            .output
            .warn(&format!("Could not delete app '{name}': {reason}")),
    }
    Ok(ExitCode::SUCCESS)
}
