//! Application lifecycle: idempotent create and delete of server-side apps.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use wf_api::Application;

use crate::application::ports::{ControlPlane, RemoteShell};
use crate::domain::ProvisionError;

/// Result of an [`ensure_app_created`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The app was created by this call.
    Created(Application),
    /// An app with this name already existed; nothing was submitted.
    AlreadyExists,
}

/// Result of an [`ensure_app_deleted`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The app existed and was deleted.
    Deleted,
    /// No app with this name existed; nothing was submitted.
    NotPresent,
    /// The server refused the deletion; safe to continue with other apps.
    Failed { reason: String },
}

/// Create `name` unless an app with that name is already listed.
///
/// Existence is re-observed via `list_apps` on every call rather than taken
/// from earlier state, so repeating the call after a partial run converges
/// without duplicate-name faults.
///
/// # Errors
///
/// Returns [`ProvisionError::Create`] when the server rejects the creation,
/// and [`ProvisionError::Api`] for transport, authentication, or capability
/// failures while observing existing apps.
pub fn ensure_app_created(
    api: &impl ControlPlane,
    name: &str,
    kind: &str,
    extra: &str,
) -> Result<CreateOutcome, ProvisionError> {
    if api.app_exists(name)? {
        return Ok(CreateOutcome::AlreadyExists);
    }
    let app = api
        .create_app(name, kind, extra)
        .map_err(|source| ProvisionError::Create {
            name: name.to_string(),
            source,
        })?;
    Ok(CreateOutcome::Created(app))
}

/// Delete `name` if an app with that name is listed.
///
/// Before the delete call the app's shutdown hook is run over SSH on a
/// best-effort basis: a hosted app may have a long-running process holding
/// its directory, and the control plane refuses to delete an app that is
/// still serving. Hook failures (missing script, dead connection) are
/// ignored — the delete call itself is the authority.
///
/// A rejection of the delete call itself is reported as
/// [`DeleteOutcome::Failed`] rather than an error: teardown of several apps
/// should not stop at the first refusal. Transport and authentication
/// failures still abort, since later calls would fail the same way.
///
/// # Errors
///
/// Returns [`ProvisionError::Api`] for transport, authentication, or
/// capability failures.
pub async fn ensure_app_deleted(
    api: &impl ControlPlane,
    shell: &impl RemoteShell,
    name: &str,
) -> Result<DeleteOutcome, ProvisionError> {
    if !api.app_exists(name)? {
        return Ok(DeleteOutcome::NotPresent);
    }
    let _ = shell.run_remote(&stop_hook(name)).await;
    match api.delete_app(name) {
        Ok(()) => Ok(DeleteOutcome::Deleted),
        Err(err) if err.is_call_fault() => Ok(DeleteOutcome::Failed {
            reason: err.to_string(),
        }),
        Err(err) => Err(ProvisionError::Api(err)),
    }
}

/// Shutdown command run in the app's directory before deletion.
///
/// Apache-backed apps ship an `apache2/bin/stop` script; anything else has
/// no hook and the guard makes the command a no-op.
fn stop_hook(name: &str) -> String {
    format!("cd $HOME/webapps/{name} && if test -x apache2/bin/stop; then apache2/bin/stop; fi")
}
