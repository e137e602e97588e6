//! Human-readable terminal renderer.

use std::path::Path;

use wf_api::{Application, Website};

use crate::application::services::bootstrap::BootstrapOutcome;
use crate::application::services::diagnose::{CheckStatus, Diagnosis};
use crate::application::services::lifecycle::{CreateOutcome, DeleteOutcome};
use crate::application::services::server_setup::ServerSetup;
use crate::domain::config::SlipwayConfig;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version line.
    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("slipway {version}");
        }
    }

    /// Render the effective settings, password redacted.
    pub fn render_config(&self, config: &SlipwayConfig, path: &Path) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.kv("Settings file:", &path.display().to_string());
        self.ctx.kv("Username:", &config.username);
        self.ctx.kv(
            "Password:",
            if config.password.is_empty() {
                "(not set)"
            } else {
                "(set)"
            },
        );
        self.ctx.kv("API endpoint:", &config.api_url);
        self.ctx.kv("SSH host:", &config.host());
        self.ctx.kv("Primary domain:", &config.primary_domain());
        println!();
        self.ctx.header("Apps:");
        self.ctx.kv(
            "Main:",
            &format!("{} ({})", config.main_app(), config.apps.main_kind),
        );
        self.ctx.kv(
            "Static:",
            &format!("{} ({})", config.static_app(), config.apps.static_kind),
        );
        self.ctx.kv(
            "Git:",
            &format!("{} ({})", config.git.app, config.git.kind),
        );
        println!();
        self.ctx.header("Project:");
        self.ctx.kv("Name:", &config.project.name);
        self.ctx.kv(
            "Virtualenv:",
            &format!("{} (via {})", config.venv(), config.project.venv_command),
        );
        self.ctx.kv("Repository:", &config.git_repo());
        self.ctx.kv("Remote:", &config.git_remote_url());
    }

    /// Render the account's app slots.
    pub fn render_apps(&self, apps: &[Application]) {
        if self.ctx.quiet {
            return;
        }
        if apps.is_empty() {
            println!("No apps on the account. Create the project's apps: slipway provision");
            return;
        }
        self.ctx.header("Apps:");
        for app in apps {
            println!("  {:<18} {}", app.name, app.kind);
        }
    }

    /// Render the account's websites, one block per site.
    pub fn render_websites(&self, sites: &[Website]) {
        if self.ctx.quiet {
            return;
        }
        if sites.is_empty() {
            println!("No websites on the account.");
            return;
        }
        for site in sites {
            let scheme = if site.https { "https" } else { "http" };
            self.ctx
                .header(&format!("{} ({scheme}, {})", site.name, site.ip));
            for domain in &site.subdomains {
                self.ctx.kv("domain", domain);
            }
            for mount in &site.mounts {
                self.ctx.kv("mount", &format!("{} → {}", mount.path, mount.app));
            }
        }
    }

    /// Render the advertised method list.
    pub fn render_methods(&self, methods: &[String]) {
        if self.ctx.quiet {
            return;
        }
        for method in methods {
            println!("  {method}");
        }
        println!("\n{} methods advertised", methods.len());
    }

    /// Render diagnostic probe results.
    pub fn render_diagnosis(&self, diagnosis: &Diagnosis) {
        for check in &diagnosis.checks {
            match &check.status {
                CheckStatus::Ok(detail) => {
                    self.ctx.success(&format!("{}: {detail}", check.name));
                }
                CheckStatus::Warn(detail) => {
                    self.ctx.warn(&format!("{}: {detail}", check.name));
                }
                CheckStatus::Fail(detail) => {
                    self.ctx.error(&format!("{}: {detail}", check.name));
                }
            }
        }
    }

    /// Render the provisioning summary.
    pub fn render_server_setup(&self, setup: &ServerSetup, config: &SlipwayConfig) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.kv(
            &format!("{}:", config.main_app()),
            create_outcome_label(&setup.main_app),
        );
        self.ctx.kv(
            &format!("{}:", config.static_app()),
            create_outcome_label(&setup.static_app),
        );
        self.ctx.kv(
            &format!("{}:", config.git.app),
            create_outcome_label(&setup.git_app),
        );
    }

    /// Render the teardown summary. The per-app progress already went
    /// through the reporter; this is the closing line.
    pub fn render_teardown(&self, outcomes: &[(String, DeleteOutcome)]) {
        let failed = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, DeleteOutcome::Failed { .. }))
            .count();
        if failed == 0 {
            self.ctx.success("Teardown complete");
        } else {
            self.ctx
                .warn(&format!("Teardown finished with {failed} app(s) left behind"));
        }
    }

    /// Render the bootstrap result.
    pub fn render_bootstrap(&self, outcome: &BootstrapOutcome, config: &SlipwayConfig) {
        match outcome {
            BootstrapOutcome::AlreadyBootstrapped => {
                self.ctx.info(&format!(
                    "{} was already attached; nothing to do",
                    config.git_subdomain()
                ));
            }
            BootstrapOutcome::Bootstrapped { website } => {
                self.ctx.success(&format!(
                    "{} now serves git over HTTPS from '{}'",
                    config.git_subdomain(),
                    website.name
                ));
                self.ctx.info("Link a local repository: slipway link");
            }
        }
    }
}

fn create_outcome_label(outcome: &CreateOutcome) -> &'static str {
    match outcome {
        CreateOutcome::Created(_) => "created",
        CreateOutcome::AlreadyExists => "already present",
    }
}
