//! Server-side provisioning: app slots, virtualenv, bare repo, cleanup.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{ControlPlane, ProgressReporter, RemoteShell};
use crate::application::services::lifecycle::{
    CreateOutcome, DeleteOutcome, ensure_app_created, ensure_app_deleted,
};
use crate::domain::config::SlipwayConfig;

/// What a [`provision_server`] run did to each app slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSetup {
    pub main_app: CreateOutcome,
    pub static_app: CreateOutcome,
    pub git_app: CreateOutcome,
}

/// Bring the server to its provisioned state, re-runnable at any point.
///
/// App slots are ensured through the control plane; everything inside them
/// (the virtualenv, the bare repository, the placeholder index) is only
/// reachable over SSH, so those steps run as guarded shell commands that
/// no-op when the artifact already exists.
///
/// With `fresh`, the app slots are deleted first and the bare repository is
/// wiped, reproducing a from-scratch install. Slot deletion refusals are
/// reported and skipped; the re-create then converges on the existing slot.
///
/// # Errors
///
/// Control-plane failures during creation are fatal, as is any remote step
/// that exits non-zero — a half-made virtualenv or repo is not something a
/// later step can paper over, and a re-run picks up where this one stopped.
pub async fn provision_server(
    api: &impl ControlPlane,
    shell: &impl RemoteShell,
    config: &SlipwayConfig,
    reporter: &impl ProgressReporter,
    fresh: bool,
) -> Result<ServerSetup> {
    if fresh {
        teardown_apps(api, shell, config, reporter).await?;
    }

    let main_app = ensure_app(api, reporter, &config.main_app(), &config.apps.main_kind, "")?;
    let static_app = ensure_app(
        api,
        reporter,
        &config.static_app(),
        &config.apps.static_kind,
        "",
    )?;
    // The bare repo lives inside the git app's directory, so the slot must
    // exist before the repo step even though the subdomain wiring is a
    // separate bootstrap.
    let git_app = ensure_app(
        api,
        reporter,
        &config.git.app,
        &config.git.kind,
        &config.git_secret(),
    )?;

    reporter.step(&format!("Setting up virtualenv '{}'", config.venv()));
    run_checked(shell, "virtualenv setup", &venv_setup(config)).await?;

    if fresh {
        run_checked(shell, "repository wipe", &repo_wipe(config)).await?;
    }
    reporter.step(&format!("Setting up bare repository '{}'", config.git_repo()));
    run_checked(shell, "bare repository setup", &repo_setup(config)).await?;

    reporter.step("Removing the placeholder index page");
    run_checked(shell, "placeholder removal", &placeholder_removal(config)).await?;

    reporter.success("Server setup complete");
    Ok(ServerSetup {
        main_app,
        static_app,
        git_app,
    })
}

/// Delete the project's main and static app slots.
///
/// The git app is left alone: it holds the hosted repositories, and wiping
/// those is never implied by tearing down the project's serving apps.
/// Refused deletions are warned about and skipped so the other slot still
/// gets its chance.
///
/// # Errors
///
/// Transport, authentication, and capability failures abort; per-app
/// refusals do not.
pub async fn teardown_apps(
    api: &impl ControlPlane,
    shell: &impl RemoteShell,
    config: &SlipwayConfig,
    reporter: &impl ProgressReporter,
) -> Result<Vec<(String, DeleteOutcome)>> {
    let mut outcomes = Vec::new();
    for name in [config.main_app(), config.static_app()] {
        reporter.step(&format!("Deleting app '{name}'"));
        let outcome = ensure_app_deleted(api, shell, &name).await?;
        match &outcome {
            DeleteOutcome::Deleted => reporter.success(&format!("Deleted '{name}'")),
            DeleteOutcome::NotPresent => reporter.step(&format!("'{name}' was not present")),
            DeleteOutcome::Failed { reason } => {
                reporter.warn(&format!("Could not delete '{name}': {reason}"));
            }
        }
        outcomes.push((name, outcome));
    }
    Ok(outcomes)
}

fn ensure_app(
    api: &impl ControlPlane,
    reporter: &impl ProgressReporter,
    name: &str,
    kind: &str,
    extra: &str,
) -> Result<CreateOutcome> {
    reporter.step(&format!("Ensuring app '{name}' ({kind})"));
    let outcome = ensure_app_created(api, name, kind, extra)?;
    if outcome == CreateOutcome::AlreadyExists {
        reporter.step(&format!("'{name}' already present"));
    }
    Ok(outcome)
}

async fn run_checked(shell: &impl RemoteShell, step: &str, command: &str) -> Result<()> {
    let output = shell
        .run_remote(command)
        .await
        .with_context(|| format!("running remote step: {step}"))?;
    anyhow::ensure!(
        output.status.success(),
        "remote step '{step}' failed: {}",
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(())
}

// ── Remote command construction ──────────────────────────────────────────────

fn venv_setup(config: &SlipwayConfig) -> String {
    format!(
        "cd {root} && if test ! -d {venv}; then {command} {venv}; fi",
        root = config.app_root(&config.main_app()),
        venv = config.venv(),
        command = config.project.venv_command,
    )
}

fn repo_setup(config: &SlipwayConfig) -> String {
    format!(
        "cd {root} && if test ! -d repos/{repo}; then \
         git init --bare ./repos/{repo} && \
         cd repos/{repo} && git config http.receivepack true; fi",
        root = config.app_root(&config.git.app),
        repo = config.git_repo(),
    )
}

fn repo_wipe(config: &SlipwayConfig) -> String {
    format!(
        "rm -rf {root}/repos/{repo}",
        root = config.app_root(&config.git.app),
        repo = config.git_repo(),
    )
}

fn placeholder_removal(config: &SlipwayConfig) -> String {
    format!(
        "rm -f {root}/index.html",
        root = config.app_root(&config.static_app()),
    )
}
