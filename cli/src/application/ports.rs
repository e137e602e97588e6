//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `wf_api` — never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::config::SlipwayConfig;
use crate::domain::error::ApiError;
use wf_api::{AppMount, Application, Website};

// ── Control-plane port ────────────────────────────────────────────────────────

/// The finite set of control-plane operations the CLI performs.
///
/// Implementations own session establishment and capability gating: every
/// method is expected to log in lazily on first use, refuse methods the
/// server does not advertise, and inject the session token. Errors stay
/// typed as [`ApiError`] because callers branch on them — a server-reported
/// fault during cleanup is handled differently from a transport failure.
pub trait ControlPlane {
    /// All application slots on the account, observed fresh.
    fn list_apps(&self) -> Result<Vec<Application>, ApiError>;

    /// Create an app slot. `extra` carries type-specific settings (for git
    /// apps, the shared secret). Autostart is always off.
    fn create_app(&self, name: &str, kind: &str, extra: &str) -> Result<Application, ApiError>;

    /// Delete an app slot by name.
    fn delete_app(&self, name: &str) -> Result<(), ApiError>;

    /// All websites on the account, observed fresh.
    fn list_websites(&self) -> Result<Vec<Website>, ApiError>;

    /// Register `subdomain` under `domain`.
    fn create_domain(&self, domain: &str, subdomain: &str) -> Result<(), ApiError>;

    /// Create a website serving `domains` from `ip`, with apps mounted at
    /// URL paths.
    fn create_website(
        &self,
        name: &str,
        ip: &str,
        https: bool,
        domains: &[String],
        mounts: &[AppMount],
    ) -> Result<Website, ApiError>;

    /// The capability snapshot: every method the server advertises.
    fn advertised_methods(&self) -> Result<Vec<String>, ApiError>;

    /// Apps whose name equals `name`. The control plane scopes listings to
    /// the account, so more than one match means a confused listing.
    fn find_apps_by_name(&self, name: &str) -> Result<Vec<Application>, ApiError> {
        Ok(self
            .list_apps()?
            .into_iter()
            .filter(|app| app.name == name)
            .collect())
    }

    /// Whether exactly one app with `name` exists.
    fn app_exists(&self, name: &str) -> Result<bool, ApiError> {
        Ok(self.find_apps_by_name(name)?.len() == 1)
    }
}

// ── Remote shell port ─────────────────────────────────────────────────────────

/// Command execution on the hosting server, outside the control plane.
///
/// App contents (virtualenvs, bare repos, stop hooks) are only reachable
/// over SSH; the control plane manages slots, not their contents.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run a shell command on the server and capture its output.
    async fn run_remote(&self, command: &str) -> Result<Output>;
}

// ── Command runner port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds the
    /// runner's timeout. On timeout, the child process must be killed
    /// (not left orphaned).
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with `dir` as its working directory.
    async fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<Output>;
}

// ── Progress reporting port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config store port ─────────────────────────────────────────────────────────

/// Abstracts settings persistence (load/save/path).
pub trait ConfigStore {
    /// Load settings, falling back to defaults when no file exists.
    fn load(&self) -> Result<SlipwayConfig>;
    /// Persist settings.
    fn save(&self, config: &SlipwayConfig) -> Result<()>;
    /// Location of the settings file.
    fn path(&self) -> Result<PathBuf>;
}
