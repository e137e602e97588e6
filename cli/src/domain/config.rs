//! Domain types and validators for Slipway configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access. Settings
//! the account owner leaves empty are derived from the ones they set:
//! the host and primary domain come from the username, app names and the
//! git repo name come from the project name.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_API_URL: &str = "https://api.webfaction.com/";

/// Account naming rule enforced by the provider for app slots; checked here
/// before any name reaches the control plane.
pub static APP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z][a-z0-9_]{0,15}$").expect("valid regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `slipway.yaml` (working directory) or
/// `~/.slipway/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipwayConfig {
    /// Control-panel account name.
    pub username: String,
    /// Control-panel password. `SLIPWAY_PASSWORD` overrides it at load time.
    pub password: String,
    /// Control-plane endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// SSH host; empty means `<username>.webfactional.com`.
    pub host: String,
    /// Domain the primary website serves; empty means
    /// `<username>.webfactional.com`.
    pub primary_domain: String,
    /// Project settings.
    pub project: ProjectConfig,
    /// Application slot settings.
    pub apps: AppsConfig,
    /// Git hosting settings.
    pub git: GitConfig,
}

impl Default for SlipwayConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            api_url: default_api_url(),
            host: String::new(),
            primary_domain: String::new(),
            project: ProjectConfig::default(),
            apps: AppsConfig::default(),
            git: GitConfig::default(),
        }
    }
}

/// Project-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name; app names and the repo name derive from it.
    pub name: String,
    /// Virtualenv directory name; empty means `<name>_env`.
    pub venv: String,
    /// Command used to create virtualenvs.
    #[serde(default = "default_venv_command")]
    pub venv_command: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            venv: String::new(),
            venv_command: default_venv_command(),
        }
    }
}

/// Application slot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    /// Main app slot; empty means the project name.
    pub main_name: String,
    /// Main app type on the control plane.
    #[serde(default = "default_main_kind")]
    pub main_kind: String,
    /// Static-files app slot; empty means `<project>_static`.
    pub static_name: String,
    /// Static app type on the control plane.
    #[serde(default = "default_static_kind")]
    pub static_kind: String,
}

impl Default for AppsConfig {
    fn default() -> Self {
        Self {
            main_name: String::new(),
            main_kind: default_main_kind(),
            static_name: String::new(),
            static_kind: default_static_kind(),
        }
    }
}

/// Git hosting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// App slot serving git over HTTP.
    pub app: String,
    /// Git app type on the control plane.
    pub kind: String,
    /// Shared secret for git-over-HTTP auth; empty means the account password.
    pub secret: String,
    /// Bare repository name; empty means `<project>.git`.
    pub repo: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            app: "git".to_string(),
            kind: "git".to_string(),
            secret: String::new(),
            repo: String::new(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_venv_command() -> String {
    "virtualenv".to_string()
}

fn default_main_kind() -> String {
    "mod_wsgi35-python27".to_string()
}

fn default_static_kind() -> String {
    "static".to_string()
}

// ── Derived settings ─────────────────────────────────────────────────────────

impl SlipwayConfig {
    /// SSH host, derived from the username when unset.
    #[must_use]
    pub fn host(&self) -> String {
        if self.host.is_empty() {
            format!("{}.webfactional.com", self.username)
        } else {
            self.host.clone()
        }
    }

    /// Domain the primary website serves, derived from the username when unset.
    #[must_use]
    pub fn primary_domain(&self) -> String {
        if self.primary_domain.is_empty() {
            format!("{}.webfactional.com", self.username)
        } else {
            self.primary_domain.clone()
        }
    }

    /// Subdomain the git website serves: `git.<primary-domain>`.
    #[must_use]
    pub fn git_subdomain(&self) -> String {
        format!("git.{}", self.primary_domain())
    }

    /// Main app slot name.
    #[must_use]
    pub fn main_app(&self) -> String {
        if self.apps.main_name.is_empty() {
            self.project.name.clone()
        } else {
            self.apps.main_name.clone()
        }
    }

    /// Static-files app slot name.
    #[must_use]
    pub fn static_app(&self) -> String {
        if self.apps.static_name.is_empty() {
            format!("{}_static", self.project.name)
        } else {
            self.apps.static_name.clone()
        }
    }

    /// Virtualenv directory name.
    #[must_use]
    pub fn venv(&self) -> String {
        if self.project.venv.is_empty() {
            format!("{}_env", self.project.name)
        } else {
            self.project.venv.clone()
        }
    }

    /// Shared secret for git-over-HTTP auth.
    #[must_use]
    pub fn git_secret(&self) -> String {
        if self.git.secret.is_empty() {
            self.password.clone()
        } else {
            self.git.secret.clone()
        }
    }

    /// Bare repository name under the git app.
    #[must_use]
    pub fn git_repo(&self) -> String {
        if self.git.repo.is_empty() {
            format!("{}.git", self.project.name)
        } else {
            self.git.repo.clone()
        }
    }

    /// `user@host` SSH target.
    #[must_use]
    pub fn ssh_target(&self) -> String {
        format!("{}@{}", self.username, self.host())
    }

    /// Home-relative root of an app slot on the server.
    #[must_use]
    pub fn app_root(&self, app: &str) -> String {
        format!("$HOME/webapps/{app}")
    }

    /// Absolute path of the hosted bare repository, used as the git remote.
    #[must_use]
    pub fn remote_repo_path(&self) -> String {
        format!(
            "/home/{}/webapps/{}/repos/{}",
            self.username,
            self.git.app,
            self.git_repo()
        )
    }

    /// SSH-style remote URL for `git remote add origin`.
    #[must_use]
    pub fn git_remote_url(&self) -> String {
        format!("{}:{}", self.ssh_target(), self.remote_repo_path())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Whether `name` is acceptable as a control-plane app slot name.
#[must_use]
pub fn valid_app_name(name: &str) -> bool {
    APP_NAME_RE.is_match(name)
}

impl SlipwayConfig {
    /// Check that every setting a provisioning run needs is present and
    /// well-formed.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing required setting or the
    /// first malformed app name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::MissingField { field: "username" });
        }
        if self.project.name.is_empty() {
            return Err(ConfigError::MissingField {
                field: "project.name",
            });
        }
        for name in [self.main_app(), self.static_app(), self.git.app.clone()] {
            if !valid_app_name(&name) {
                return Err(ConfigError::InvalidAppName { name });
            }
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
