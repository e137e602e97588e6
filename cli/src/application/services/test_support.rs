//! Shared test helpers for application service tests.
//!
//! Provides cross-platform `exit_status()`, canned `std::process::Output`
//! values, and recording fakes for the control-plane and shell ports.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{CommandRunner, ControlPlane, ProgressReporter, RemoteShell};
use crate::domain::ApiError;
use wf_api::codec::Fault;
use wf_api::{AppMount, Application, Website};

/// Build an `ExitStatus` from a logical exit code (cross-platform).
#[cfg(unix)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    std::process::ExitStatus::from_raw(code as u32)
}

pub fn ok_output(stdout: &[u8]) -> std::process::Output {
    std::process::Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn fail_output(stderr: &[u8]) -> std::process::Output {
    std::process::Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Recording control-plane fake ─────────────────────────────────────────────

/// Control-plane fake that records every mutation and keeps `apps` truthful:
/// created apps show up in later listings, deleted ones disappear.
#[derive(Default)]
pub struct RecordingControlPlane {
    pub apps: RefCell<Vec<Application>>,
    pub websites: Vec<Website>,
    pub advertised: Vec<String>,
    pub created: RefCell<Vec<String>>,
    pub deleted: RefCell<Vec<String>>,
    pub websites_created: RefCell<Vec<String>>,
    pub fail_create: bool,
    pub fail_delete: bool,
    pub fail_session: bool,
}

impl RecordingControlPlane {
    pub fn with_apps(names: &[&str]) -> Self {
        let fake = Self::default();
        for name in names {
            fake.apps.borrow_mut().push(Application {
                name: (*name).to_string(),
                kind: "static".to_string(),
                extra: String::new(),
            });
        }
        fake
    }

    fn refuse(method: &str) -> ApiError {
        ApiError::Fault {
            method: method.to_string(),
            fault: Fault {
                code: 1021,
                message: "refused".to_string(),
            },
        }
    }
}

impl ControlPlane for RecordingControlPlane {
    fn list_apps(&self) -> Result<Vec<Application>, ApiError> {
        Ok(self.apps.borrow().clone())
    }

    fn create_app(&self, name: &str, kind: &str, extra: &str) -> Result<Application, ApiError> {
        if self.fail_create {
            return Err(Self::refuse("create_app"));
        }
        let app = Application {
            name: name.to_string(),
            kind: kind.to_string(),
            extra: extra.to_string(),
        };
        self.apps.borrow_mut().push(app.clone());
        self.created.borrow_mut().push(name.to_string());
        Ok(app)
    }

    fn delete_app(&self, name: &str) -> Result<(), ApiError> {
        if self.fail_delete {
            return Err(Self::refuse("delete_app"));
        }
        self.apps.borrow_mut().retain(|app| app.name != name);
        self.deleted.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn list_websites(&self) -> Result<Vec<Website>, ApiError> {
        Ok(self.websites.clone())
    }

    fn create_domain(&self, _domain: &str, _subdomain: &str) -> Result<(), ApiError> {
        Ok(())
    }

    fn create_website(
        &self,
        name: &str,
        ip: &str,
        https: bool,
        domains: &[String],
        mounts: &[AppMount],
    ) -> Result<Website, ApiError> {
        self.websites_created.borrow_mut().push(name.to_string());
        Ok(Website {
            name: name.to_string(),
            ip: ip.to_string(),
            https,
            subdomains: domains.to_vec(),
            mounts: mounts.to_vec(),
        })
    }

    fn advertised_methods(&self) -> Result<Vec<String>, ApiError> {
        if self.fail_session {
            return Err(ApiError::Authentication {
                fault: Fault {
                    code: 1,
                    message: "LoginError".to_string(),
                },
            });
        }
        Ok(self.advertised.clone())
    }
}

// ── Recording shell fake ─────────────────────────────────────────────────────

/// Shell fake that records commands; commands containing `fail_matching`
/// exit 1, everything else succeeds.
#[derive(Default)]
pub struct RecordingShell {
    pub commands: RefCell<Vec<String>>,
    pub fail_matching: Option<String>,
}

impl RecordingShell {
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            commands: RefCell::new(Vec::new()),
            fail_matching: Some(pattern.to_string()),
        }
    }
}

impl RemoteShell for RecordingShell {
    async fn run_remote(&self, command: &str) -> Result<std::process::Output> {
        self.commands.borrow_mut().push(command.to_string());
        if let Some(pattern) = &self.fail_matching
            && command.contains(pattern.as_str())
        {
            return Ok(fail_output(b"remote step failed"));
        }
        Ok(ok_output(b""))
    }
}

// ── Recording local runner fake ──────────────────────────────────────────────

/// Local-process fake recording `"program arg arg"` lines and working
/// directories. Commands containing `fail_matching` exit 1; with
/// `nothing_to_commit`, `git commit` exits 1 the way git does on a clean
/// tree.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<String>>,
    pub dirs: RefCell<Vec<PathBuf>>,
    pub fail_matching: Option<String>,
    pub nothing_to_commit: bool,
}

impl RecordingRunner {
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            fail_matching: Some(pattern.to_string()),
            ..Self::default()
        }
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<std::process::Output> {
        self.run_in(Path::new("."), program, args).await
    }

    async fn run_in(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
    ) -> Result<std::process::Output> {
        let call = format!("{program} {}", args.join(" "));
        self.dirs.borrow_mut().push(dir.to_path_buf());
        self.calls.borrow_mut().push(call.clone());
        if let Some(pattern) = &self.fail_matching
            && call.contains(pattern.as_str())
        {
            return Ok(fail_output(b"command failed"));
        }
        if self.nothing_to_commit && call.starts_with("git commit") {
            return Ok(std::process::Output {
                status: exit_status(1),
                stdout: b"nothing to commit, working tree clean".to_vec(),
                stderr: Vec::new(),
            });
        }
        Ok(ok_output(b""))
    }
}

// ── Reporter stub ────────────────────────────────────────────────────────────

/// Reporter that swallows everything.
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
