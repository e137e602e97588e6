//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

use wf_api::{Application, Website};

use crate::application::services::bootstrap::BootstrapOutcome;
use crate::application::services::diagnose::Diagnosis;
use crate::application::services::lifecycle::DeleteOutcome;
use crate::application::services::server_setup::ServerSetup;
use crate::domain::config::SlipwayConfig;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::{Reporter, SilentReporter, TerminalReporter};
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Format selector handed to each command: human-readable lines or a single
/// machine-readable JSON object per invocation.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn config(&self, config: &SlipwayConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn apps(&self, apps: &[Application]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_apps(apps);
                Ok(())
            }
            Self::Json(r) => r.render_apps(apps),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn websites(&self, sites: &[Website]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_websites(sites);
                Ok(())
            }
            Self::Json(r) => r.render_websites(sites),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn methods(&self, methods: &[String]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_methods(methods);
                Ok(())
            }
            Self::Json(r) => r.render_methods(methods),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn diagnosis(&self, diagnosis: &Diagnosis) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_diagnosis(diagnosis);
                Ok(())
            }
            Self::Json(r) => r.render_diagnosis(diagnosis),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn server_setup(&self, setup: &ServerSetup, config: &SlipwayConfig) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_server_setup(setup, config);
                Ok(())
            }
            Self::Json(r) => r.render_server_setup(setup, config),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn teardown(&self, outcomes: &[(String, DeleteOutcome)]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_teardown(outcomes);
                Ok(())
            }
            Self::Json(r) => r.render_teardown(outcomes),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn bootstrap(&self, outcome: &BootstrapOutcome, config: &SlipwayConfig) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_bootstrap(outcome, config);
                Ok(())
            }
            Self::Json(r) => r.render_bootstrap(outcome, config),
        }
    }
}
