//! Application context — unified state passed to every command handler.
//!
//! `AppContext` replaces the per-command pattern of constructing loose
//! `OutputContext` and config-store instances. Adding a new cross-cutting
//! concern (e.g. `--verbose`, telemetry) requires only one field change
//! here — zero command signatures change.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigStore as _;
use crate::domain::config::SlipwayConfig;
use crate::infra::config::YamlConfigStore;
use crate::output::{
    HumanRenderer, JsonRenderer, OutputContext, Renderer, Reporter, SilentReporter,
    TerminalReporter,
};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Answer yes to every prompt (also set by the `SLIPWAY_YES` env var).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Settings persistence.
    pub config_store: YamlConfigStore,
    /// When `true`, every prompt is answered yes without asking.
    ///
    /// Set when `--yes` / `-y` is passed or the `SLIPWAY_YES` environment
    /// variable is present.
    pub assume_yes: bool,
    /// When `true`, prompts take their default answer instead of asking.
    ///
    /// Set when the `CI` environment variable is present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let assume_yes = flags.behaviour.yes || std::env::var("SLIPWAY_YES").is_ok();
        let non_interactive = std::env::var("CI").is_ok();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store: YamlConfigStore,
            assume_yes,
            non_interactive,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Returns the progress reporter for the current output mode. JSON mode
    /// gets the silent reporter so progress lines never interleave with the
    /// result object.
    #[must_use]
    pub fn reporter(&self) -> Reporter<'_> {
        match self.mode {
            OutputMode::Human => Reporter::Terminal(TerminalReporter::new(&self.output)),
            OutputMode::Json => Reporter::Silent(SilentReporter),
        }
    }

    /// Load settings from disk and resolve the file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or
    /// parsed, or if the home directory cannot be determined.
    pub fn load_config(&self) -> Result<(SlipwayConfig, PathBuf)> {
        let config = self.config_store.load()?;
        let path = self.config_store.path()?;
        Ok((config, path))
    }

    /// Ask the user for confirmation.
    ///
    /// With `--yes` (or `SLIPWAY_YES`) the answer is yes without prompting.
    /// Under `CI` the prompt is skipped and `default` is taken, so destructive
    /// commands abort there unless `--yes` is explicit.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
