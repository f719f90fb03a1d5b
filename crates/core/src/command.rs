// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-execution request and result shapes
//!
//! These are the values exchanged with whatever runs commands on the host.
//! Requests are always argument vectors; nothing here is ever handed to a
//! shell as text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A command to run on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub argv: Vec<String>,
    /// Run with elevated privileges
    pub elevate: bool,
}

impl CommandRequest {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            elevate: false,
        }
    }

    pub fn elevated(self, elevate: bool) -> Self {
        Self { elevate, ..self }
    }

    /// Name of the executable, for logging
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }
}

/// Captured result of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: i32,
}

impl CommandOutput {
    pub fn with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }
}

/// Machine-readable reason attached to a failure by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Problem {
    /// The executor refused to run the command at the requested privilege
    AccessDenied,
    /// The caller is not allowed to escalate
    NotAuthorized,
    /// The executable could not be found
    NotFound,
}

impl Problem {
    pub fn code(&self) -> &'static str {
        match self {
            Problem::AccessDenied => "access-denied",
            Problem::NotAuthorized => "not-authorized",
            Problem::NotFound => "not-found",
        }
    }
}

/// A failed command, carrying everything that was captured
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{} failed{}: {}", self.program(), self.exit_note(), self.message())]
pub struct CommandFailure {
    pub argv: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    /// Exit status, when the command ran at all
    pub exit_status: Option<i32>,
    pub problem: Option<Problem>,
}

impl CommandFailure {
    pub fn new(argv: &[String]) -> Self {
        Self {
            argv: argv.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_stderr(self, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            ..self
        }
    }

    pub fn with_stdout(self, stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..self
        }
    }

    pub fn with_exit_status(self, status: i32) -> Self {
        Self {
            exit_status: Some(status),
            ..self
        }
    }

    pub fn with_problem(self, problem: Problem) -> Self {
        Self {
            problem: Some(problem),
            ..self
        }
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("command")
    }

    fn exit_note(&self) -> String {
        self.exit_status
            .map(|status| format!(" (exit {})", status))
            .unwrap_or_default()
    }

    /// Most useful human-readable text: stderr, then stdout, then the problem code
    pub fn message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match (self.problem, self.exit_status) {
            (Some(problem), _) => problem.code().to_string(),
            (None, Some(status)) => format!("exited with status {}", status),
            (None, None) => "no output".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
