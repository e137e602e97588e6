//! JSON renderer and error-object formatter for `--json` code paths.
//!
//! Every command in JSON mode prints exactly one object to stdout; progress
//! lines are suppressed by routing them through a silent reporter.

use std::path::Path;

use anyhow::{Context, Result};

use wf_api::{Application, Website};

use crate::application::services::bootstrap::BootstrapOutcome;
use crate::application::services::diagnose::{CheckStatus, Diagnosis};
use crate::application::services::lifecycle::{CreateOutcome, DeleteOutcome};
use crate::application::services::server_setup::ServerSetup;
use crate::domain::config::SlipwayConfig;

/// Format a JSON error object:
///
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice — `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders command results as one pretty-printed JSON object on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn emit(&self, value: &serde_json::Value) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        self.emit(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_config(&self, config: &SlipwayConfig, path: &Path) -> Result<()> {
        self.emit(&serde_json::json!({
            "path": path.display().to_string(),
            "username": config.username,
            "password_set": !config.password.is_empty(),
            "api_url": config.api_url,
            "host": config.host(),
            "primary_domain": config.primary_domain(),
            "apps": {
                "main": { "name": config.main_app(), "type": config.apps.main_kind },
                "static": { "name": config.static_app(), "type": config.apps.static_kind },
                "git": { "name": config.git.app, "type": config.git.kind },
            },
            "project": {
                "name": config.project.name,
                "venv": config.venv(),
                "venv_command": config.project.venv_command,
                "repo": config.git_repo(),
                "remote": config.git_remote_url(),
            },
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_apps(&self, apps: &[Application]) -> Result<()> {
        self.emit(&serde_json::json!({ "apps": apps }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_websites(&self, sites: &[Website]) -> Result<()> {
        self.emit(&serde_json::json!({ "websites": sites }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_methods(&self, methods: &[String]) -> Result<()> {
        self.emit(&serde_json::json!({ "methods": methods }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_diagnosis(&self, diagnosis: &Diagnosis) -> Result<()> {
        let checks: Vec<serde_json::Value> = diagnosis
            .checks
            .iter()
            .map(|check| {
                let (status, detail) = match &check.status {
                    CheckStatus::Ok(detail) => ("ok", detail),
                    CheckStatus::Warn(detail) => ("warn", detail),
                    CheckStatus::Fail(detail) => ("fail", detail),
                };
                serde_json::json!({
                    "name": check.name,
                    "status": status,
                    "detail": detail,
                })
            })
            .collect();
        self.emit(&serde_json::json!({
            "healthy": diagnosis.healthy(),
            "checks": checks,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_server_setup(&self, setup: &ServerSetup, config: &SlipwayConfig) -> Result<()> {
        self.emit(&serde_json::json!({
            "apps": {
                "main": {
                    "name": config.main_app(),
                    "outcome": create_outcome_label(&setup.main_app),
                },
                "static": {
                    "name": config.static_app(),
                    "outcome": create_outcome_label(&setup.static_app),
                },
                "git": {
                    "name": config.git.app,
                    "outcome": create_outcome_label(&setup.git_app),
                },
            },
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_teardown(&self, outcomes: &[(String, DeleteOutcome)]) -> Result<()> {
        let apps: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|(name, outcome)| match outcome {
                DeleteOutcome::Deleted => serde_json::json!({
                    "name": name, "outcome": "deleted",
                }),
                DeleteOutcome::NotPresent => serde_json::json!({
                    "name": name, "outcome": "not-present",
                }),
                DeleteOutcome::Failed { reason } => serde_json::json!({
                    "name": name, "outcome": "failed", "reason": reason,
                }),
            })
            .collect();
        self.emit(&serde_json::json!({ "apps": apps }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization or stdout writing fails.
    pub fn render_bootstrap(
        &self,
        outcome: &BootstrapOutcome,
        config: &SlipwayConfig,
    ) -> Result<()> {
        match outcome {
            BootstrapOutcome::AlreadyBootstrapped => self.emit(&serde_json::json!({
                "outcome": "already-bootstrapped",
                "git_domain": config.git_subdomain(),
            })),
            BootstrapOutcome::Bootstrapped { website } => self.emit(&serde_json::json!({
                "outcome": "bootstrapped",
                "git_domain": config.git_subdomain(),
                "website": website,
            })),
        }
    }
}

fn create_outcome_label(outcome: &CreateOutcome) -> &'static str {
    match outcome {
        CreateOutcome::Created(_) => "created",
        CreateOutcome::AlreadyExists => "present",
    }
}
