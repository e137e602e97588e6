//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::error::{ApiError, BootstrapError, ConfigError, ProvisionError};
use crate::output::json;

/// Provision and bootstrap sites on WebFaction-style hosting accounts
#[derive(Parser)]
#[command(
    name = "slipway",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Assume yes for every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the project's apps and prepare the server
    Provision(commands::provision::ProvisionArgs),

    /// Delete the project's apps from the account
    Teardown,

    /// Attach the git subdomain and its website to the account
    BootstrapGit,

    /// Manage application slots
    #[command(subcommand)]
    Apps(commands::apps::AppsCommand),

    /// Inspect websites
    #[command(subcommand)]
    Websites(commands::websites::WebsitesCommand),

    /// List the methods the control plane advertises
    Methods,

    /// Check settings, login, and account prerequisites
    Check,

    /// Set up the local project: virtualenv, git repo, .gitignore
    Init(commands::init::InitArgs),

    /// Point the local repo at the hosted remote and push
    Link(commands::link::LinkArgs),

    /// Manage settings
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error when a command fails in human mode. In JSON mode,
    /// failures are printed as a JSON error object and mapped to a failure
    /// exit code instead.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        });

        let result = match command {
            Command::Provision(args) => commands::provision::run(&app, &args).await,
            Command::Teardown => commands::teardown::run(&app).await,
            Command::BootstrapGit => commands::bootstrap_git::run(&app),
            Command::Apps(cmd) => commands::apps::run(&app, cmd).await,
            Command::Websites(cmd) => commands::websites::run(&app, cmd),
            Command::Methods => commands::methods::run(&app),
            Command::Check => commands::check::run(&app),
            Command::Init(args) => commands::init::run(&app, &args).await,
            Command::Link(args) => commands::link::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        };

        match result {
            Ok(code) => Ok(code),
            Err(e) if app.is_json() => {
                println!("{}", json::format_error(&format!("{e:#}"), error_code(&e))?);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e),
        }
    }
}

/// Stable machine-readable code for the JSON error object.
fn error_code(error: &anyhow::Error) -> &'static str {
    // Composite errors first: downcast matches the stored concrete type,
    // and BootstrapError/ProvisionError wrap ApiError rather than being one.
    if let Some(e) = error.downcast_ref::<BootstrapError>() {
        return match e {
            BootstrapError::PrimarySiteMissing { .. } => "prerequisite_missing",
            BootstrapError::Provision(p) => provision_code(p),
            BootstrapError::Api(a) => api_code(a),
        };
    }
    if let Some(e) = error.downcast_ref::<ProvisionError>() {
        return provision_code(e);
    }
    if let Some(e) = error.downcast_ref::<ApiError>() {
        return api_code(e);
    }
    if error.downcast_ref::<ConfigError>().is_some() {
        return "config";
    }
    "error"
}

fn api_code(error: &ApiError) -> &'static str {
    match error {
        ApiError::Authentication { .. } => "authentication",
        ApiError::Unsupported { .. } => "capability",
        ApiError::Fault { .. } => "remote_fault",
        ApiError::Transport { .. } | ApiError::Http { .. } => "transport",
        ApiError::Decode(_) | ApiError::MalformedLogin => "protocol",
    }
}

fn provision_code(error: &ProvisionError) -> &'static str {
    match error {
        ProvisionError::Create { .. } => "create_collision",
        ProvisionError::Api(api) => api_code(api),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
