//! One-time git-over-HTTP bootstrap: subdomain, app, and website rewire.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use wf_api::{AppMount, Website};

use crate::application::ports::{ControlPlane, ProgressReporter};
use crate::application::services::lifecycle::{CreateOutcome, ensure_app_created};
use crate::domain::config::SlipwayConfig;
use crate::domain::error::BootstrapError;

/// Result of a [`bootstrap_git_domain`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A website already serves the git subdomain; nothing was submitted.
    AlreadyBootstrapped,
    /// The full sequence ran; `website` is the newly created git site.
    Bootstrapped { website: Website },
}

/// Attach `git.<primary-domain>` to the account, re-runnable at any point.
///
/// The sequence is: register the subdomain, provision the git app, then
/// create a website binding the subdomain to the app. Ordering matters
/// because the server validates that the domain and app exist before it
/// accepts the website. There is no rollback — a failure partway leaves
/// the completed steps in place, and a re-run re-derives its position from
/// the listings and performs only the remaining work.
///
/// The created website serves the union of the primary site's subdomains
/// and the git subdomain, so the existing names keep resolving alongside
/// the new one.
///
/// # Errors
///
/// [`BootstrapError::PrimarySiteMissing`] when no website serves the
/// primary domain (the account must already host it), plus the underlying
/// API and provisioning errors — all fatal, per the no-rollback policy.
pub fn bootstrap_git_domain(
    api: &impl ControlPlane,
    config: &SlipwayConfig,
    reporter: &impl ProgressReporter,
) -> Result<BootstrapOutcome, BootstrapError> {
    let primary = config.primary_domain();
    let git_domain = config.git_subdomain();

    let sites = api.list_websites()?;
    let Some(site) = sites.iter().find(|site| site.serves(&primary)) else {
        return Err(BootstrapError::PrimarySiteMissing { domain: primary });
    };
    // The git site itself serves the primary domain once created, so the
    // convergence check looks at every site, not just the one located above.
    if sites.iter().any(|site| site.serves(&git_domain)) {
        reporter.success(&format!("{git_domain} is already set up"));
        return Ok(BootstrapOutcome::AlreadyBootstrapped);
    }

    reporter.step(&format!("Registering {git_domain}"));
    api.create_domain(&primary, "git")?;

    reporter.step(&format!("Provisioning app '{}'", config.git.app));
    match ensure_app_created(api, &config.git.app, &config.git.kind, &config.git_secret())? {
        CreateOutcome::Created(_) => {}
        CreateOutcome::AlreadyExists => {
            reporter.step(&format!("App '{}' already present", config.git.app));
        }
    }

    let mut domains = site.subdomains.clone();
    domains.push(git_domain.clone());
    let mounts = [AppMount::new(&config.git.app, "/")];

    reporter.step(&format!("Creating website '{}'", config.git.app));
    let website = api.create_website(&config.git.app, &site.ip, true, &domains, &mounts)?;

    reporter.success(&format!("{git_domain} now serves the git app"));
    Ok(BootstrapOutcome::Bootstrapped { website })
}
