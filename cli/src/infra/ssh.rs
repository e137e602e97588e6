//! Infrastructure implementation of the `RemoteShell` port.
//!
//! Server-side steps (stop hooks, virtualenvs, bare repos) run over plain
//! `ssh` with key-based auth. `BatchMode=yes` keeps a missing key from
//! degenerating into a password prompt inside a provisioning run.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::{CommandRunner, RemoteShell};

/// Remote shell over `ssh`, generic over the process runner.
pub struct SshShell<R: CommandRunner> {
    runner: R,
    target: String,
}

impl<R: CommandRunner> SshShell<R> {
    /// `target` is the `user@host` SSH destination.
    #[must_use]
    pub fn new(runner: R, target: impl Into<String>) -> Self {
        Self {
            runner,
            target: target.into(),
        }
    }
}

impl<R: CommandRunner> RemoteShell for SshShell<R> {
    async fn run_remote(&self, command: &str) -> Result<Output> {
        self.runner
            .run(
                "ssh",
                &[
                    "-o",
                    "BatchMode=yes",
                    "-o",
                    "LogLevel=ERROR",
                    &self.target,
                    command,
                ],
            )
            .await
    }
}
