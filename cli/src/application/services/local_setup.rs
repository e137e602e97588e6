//! Local project setup: virtualenv, git repository, and the hosted remote.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::config::SlipwayConfig;

/// Raise the push buffer so a large first push over the provider's HTTP
/// frontend does not stall; value from the provider's own guidance (500 MB).
const GIT_POST_BUFFER: &str = "524288000";

/// Set up the project directory: virtualenv, git repository, `.gitignore`,
/// and an initial commit.
///
/// Re-running converges: the virtualenv tool refreshes an existing env,
/// `git init` leaves an existing repository alone, and a clean tree turns
/// the commit into a reported no-op. With `wipe_existing` the `.git`
/// directory is removed first for a genuinely fresh history — callers must
/// confirm that with the operator before passing it.
///
/// # Errors
///
/// Fails when any local command exits non-zero (except the nothing-to-commit
/// case) or the `.gitignore` write fails.
pub async fn init_project(
    runner: &impl CommandRunner,
    project_dir: &Path,
    config: &SlipwayConfig,
    gitignore_template: &str,
    wipe_existing: bool,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("Creating virtualenv '{}'", config.venv()));
    run_checked(
        runner,
        project_dir,
        &config.project.venv_command,
        &[&config.venv()],
    )
    .await?;

    if wipe_existing {
        remove_git_dir(project_dir.join(".git")).await?;
    }
    reporter.step("Initializing the git repository");
    run_checked(runner, project_dir, "git", &["init"]).await?;

    reporter.step("Writing .gitignore");
    let gitignore = format!("{}\n{}/\n", gitignore_template.trim_end(), config.venv());
    write_file(project_dir.join(".gitignore"), gitignore).await?;

    run_checked(runner, project_dir, "git", &["add", "."]).await?;
    let commit = runner
        .run_in(project_dir, "git", &["commit", "-am", "Initial commit."])
        .await
        .context("running git commit")?;
    if commit.status.success() {
        reporter.success("Project initialized and committed");
    } else if tree_was_clean(&commit) {
        reporter.step("Nothing new to commit");
        reporter.success("Project already initialized");
    } else {
        anyhow::bail!(
            "git commit failed: {}",
            String::from_utf8_lossy(&commit.stderr).trim()
        );
    }
    Ok(())
}

/// Point the repository's `origin` at the hosted bare repo and push.
///
/// The per-repository git settings mirror what the provider's git frontend
/// needs: certificate checking off for its self-signed HTTPS endpoint and a
/// large post buffer for the first push. Any previous `origin` is replaced;
/// having none to remove is the normal fresh-repo case.
///
/// # Errors
///
/// Fails when a git configuration step or the push exits non-zero.
pub async fn link_remote(
    runner: &impl CommandRunner,
    project_dir: &Path,
    config: &SlipwayConfig,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let url = config.git_remote_url();

    reporter.step("Configuring the repository for the hosted remote");
    run_checked(runner, project_dir, "git", &["config", "http.sslVerify", "false"]).await?;
    run_checked(
        runner,
        project_dir,
        "git",
        &["config", "http.postBuffer", GIT_POST_BUFFER],
    )
    .await?;

    let _ = runner
        .run_in(project_dir, "git", &["remote", "rm", "origin"])
        .await;
    run_checked(
        runner,
        project_dir,
        "git",
        &["remote", "add", "origin", &url],
    )
    .await?;

    reporter.step(&format!("Pushing master to {url}"));
    run_checked(runner, project_dir, "git", &["push", "-u", "origin", "master"]).await?;

    reporter.success("Repository linked and pushed");
    Ok(())
}

fn tree_was_clean(output: &std::process::Output) -> bool {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    stdout.contains("nothing to commit") || stderr.contains("nothing to commit")
}

async fn run_checked(
    runner: &impl CommandRunner,
    dir: &Path,
    program: &str,
    args: &[&str],
) -> Result<()> {
    let rendered = format!("{program} {}", args.join(" "));
    let output = runner
        .run_in(dir, program, args)
        .await
        .with_context(|| format!("running {rendered}"))?;
    anyhow::ensure!(
        output.status.success(),
        "{rendered} failed: {}",
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(())
}

async fn write_file(path: PathBuf, content: String) -> Result<()> {
    tokio::task::spawn_blocking(move || std::fs::write(&path, content))
        .await
        .context("file write task")?
        .context("writing .gitignore")
}

async fn remove_git_dir(path: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || match std::fs::remove_dir_all(&path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    })
    .await
    .context("repository removal task")?
    .context("removing the existing .git directory")
}
