//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;
use wf_api::{CodecError, Fault};

// ── Control-plane errors ──────────────────────────────────────────────────────

/// Errors from the control-plane client: session establishment, capability
/// gating, and checked remote calls.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Login to the control plane was rejected ({fault}). Check the credentials: slipway config show")]
    Authentication { fault: Fault },

    #[error("The control plane does not advertise '{method}'. The account plan may not include it.")]
    Unsupported { method: String },

    #[error("'{method}' failed on the control plane: {fault}")]
    Fault { method: String, fault: Fault },

    #[error("Cannot reach the control plane: {detail}")]
    Transport { detail: String },

    #[error("The control plane answered HTTP {status} instead of an RPC response.")]
    Http { status: u16 },

    #[error("Cannot decode the control-plane response: {0}")]
    Decode(#[from] CodecError),

    #[error("The login response carried no session token.")]
    MalformedLogin,
}

impl ApiError {
    /// Whether this error is a server-reported fault on a regular call,
    /// as opposed to an authentication, capability, or transport failure.
    #[must_use]
    pub fn is_call_fault(&self) -> bool {
        matches!(self, ApiError::Fault { .. })
    }
}

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Errors from app creation and deletion.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Cannot create app '{name}': {source}. Resolve the collision on the control panel, then re-run.")]
    Create { name: String, source: ApiError },
}

// ── Bootstrap errors ──────────────────────────────────────────────────────────

/// Errors from the git-domain bootstrap sequence.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("No website serves '{domain}'. Create the primary site on the control panel first, then re-run: slipway bootstrap-git")]
    PrimarySiteMissing { domain: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration completeness and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required setting '{field}' is not set. Run 'slipway config init' and edit the file it creates.")]
    MissingField { field: &'static str },

    #[error("Invalid app name '{name}': must match ^[a-z][a-z0-9_]{{0,15}}$")]
    InvalidAppName { name: String },
}
