// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local process adapter

use super::CommandAdapter;
use async_trait::async_trait;
use ctm_core::{CommandFailure, CommandOutput, CommandRequest, Problem};
use std::io;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs commands as local child processes.
///
/// Elevated requests are prefixed with the configured wrapper (for example
/// `sudo -n`). No shell is involved at any point.
#[derive(Clone, Debug)]
pub struct ProcessAdapter {
    elevate_with: Vec<String>,
    writer: Vec<String>,
}

impl Default for ProcessAdapter {
    fn default() -> Self {
        Self {
            elevate_with: vec!["sudo".to_string(), "-n".to_string()],
            writer: vec!["tee".to_string(), "--".to_string()],
        }
    }
}

impl ProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrapper used for elevated requests
    pub fn with_elevation(mut self, elevate_with: Vec<String>) -> Self {
        self.elevate_with = elevate_with;
        self
    }

    /// Set the stdin-to-file writer used by `write_file`; the path is appended
    pub fn with_writer(mut self, writer: Vec<String>) -> Self {
        self.writer = writer;
        self
    }

    /// Full argument vector for a request, including any elevation wrapper
    fn full_argv(&self, argv: &[String], elevate: bool) -> Vec<String> {
        if elevate {
            self.elevate_with.iter().chain(argv).cloned().collect()
        } else {
            argv.to_vec()
        }
    }

    fn command(argv: &[String]) -> Result<Command, CommandFailure> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            CommandFailure::new(argv).with_stderr("empty command line")
        })?;
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);
        Ok(cmd)
    }
}

/// Translate a spawn error into a failure with a problem code
fn spawn_failure(argv: &[String], err: io::Error) -> CommandFailure {
    let failure = CommandFailure::new(argv).with_stderr(err.to_string());
    match err.kind() {
        io::ErrorKind::NotFound => failure.with_problem(Problem::NotFound),
        io::ErrorKind::PermissionDenied => failure.with_problem(Problem::AccessDenied),
        _ => failure,
    }
}

fn finish(argv: &[String], output: std::process::Output) -> Result<CommandOutput, CommandFailure> {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    // Killed by a signal: no exit code
    let status = output.status.code().unwrap_or(-1);

    if output.status.success() {
        Ok(CommandOutput {
            stdout,
            stderr,
            exit_status: status,
        })
    } else {
        Err(CommandFailure::new(argv)
            .with_stdout(stdout)
            .with_stderr(stderr)
            .with_exit_status(status))
    }
}

#[async_trait]
impl CommandAdapter for ProcessAdapter {
    async fn execute(&self, request: CommandRequest) -> Result<CommandOutput, CommandFailure> {
        let argv = self.full_argv(&request.argv, request.elevate);

        let output = Self::command(&argv)?
            .output()
            .await
            .map_err(|e| spawn_failure(&argv, e))?;

        finish(&argv, output)
    }

    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        elevate: bool,
    ) -> Result<(), CommandFailure> {
        let mut base = self.writer.clone();
        base.push(path.to_string());
        let argv = self.full_argv(&base, elevate);

        let mut child = Self::command(&argv)?
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_failure(&argv, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            let written = stdin.write_all(content).await;
            // Close stdin so the writer sees EOF before we wait on it
            drop(stdin);
            if let Err(e) = written {
                let _ = child.kill().await;
                return Err(CommandFailure::new(&argv).with_stderr(e.to_string()));
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| spawn_failure(&argv, e))?;

        finish(&argv, output).map(|_| ())
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
