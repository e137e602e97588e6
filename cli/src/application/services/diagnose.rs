//! Account diagnostics: settings, session, capabilities, site wiring.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::ControlPlane;
use crate::domain::config::SlipwayConfig;
use wf_api::methods;

/// One probe's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Ok(String),
    Warn(String),
    Fail(String),
}

/// A named probe with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
}

/// The full set of probe results for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnosis {
    pub checks: Vec<Check>,
}

impl Diagnosis {
    fn push(&mut self, name: &'static str, status: CheckStatus) {
        self.checks.push(Check { name, status });
    }

    /// Whether no probe failed. Warnings count as healthy — they flag work
    /// not yet done, not something broken.
    #[must_use]
    pub fn healthy(&self) -> bool {
        self.checks
            .iter()
            .all(|check| !matches!(check.status, CheckStatus::Fail(_)))
    }
}

/// Probe the account end to end: settings, login, advertised capabilities,
/// the primary website, and the git subdomain.
///
/// Read-only — performs listing calls but never a mutation. When the
/// session cannot be established, the remote probes are skipped: they
/// would all fail with the same cause and bury it.
pub fn diagnose(api: &impl ControlPlane, config: &SlipwayConfig) -> Diagnosis {
    let mut diagnosis = Diagnosis::default();

    match config.validate() {
        Ok(()) => diagnosis.push("settings", CheckStatus::Ok("complete".to_string())),
        Err(err) => {
            diagnosis.push("settings", CheckStatus::Fail(err.to_string()));
            return diagnosis;
        }
    }

    let advertised = match api.advertised_methods() {
        Ok(advertised) => {
            diagnosis.push(
                "control-plane login",
                CheckStatus::Ok(format!("{} methods advertised", advertised.len())),
            );
            advertised
        }
        Err(err) => {
            diagnosis.push("control-plane login", CheckStatus::Fail(err.to_string()));
            return diagnosis;
        }
    };

    let missing: Vec<&str> = methods::REQUIRED
        .iter()
        .filter(|method| !advertised.iter().any(|have| have == *method))
        .copied()
        .collect();
    if missing.is_empty() {
        diagnosis.push(
            "required methods",
            CheckStatus::Ok("all advertised".to_string()),
        );
    } else {
        diagnosis.push(
            "required methods",
            CheckStatus::Fail(format!("not advertised: {}", missing.join(", "))),
        );
    }

    let primary = config.primary_domain();
    let git_domain = config.git_subdomain();
    match api.list_websites() {
        Ok(sites) => {
            if sites.iter().any(|site| site.serves(&primary)) {
                diagnosis.push("primary website", CheckStatus::Ok(primary));
            } else {
                diagnosis.push(
                    "primary website",
                    CheckStatus::Fail(format!("no website serves {primary}")),
                );
            }
            if sites.iter().any(|site| site.serves(&git_domain)) {
                diagnosis.push("git subdomain", CheckStatus::Ok(git_domain));
            } else {
                diagnosis.push(
                    "git subdomain",
                    CheckStatus::Warn(format!(
                        "{git_domain} not attached yet; run: slipway bootstrap-git"
                    )),
                );
            }
        }
        Err(err) => diagnosis.push("primary website", CheckStatus::Fail(err.to_string())),
    }

    diagnosis
}
