// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error carries:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use ctm_core::{DocumentError, FailureKind, InstallOutcome, TargetIdentity};
use ctm_engine::{ConfigError, SessionError};
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CtmError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Machine-readable outcome, when the host was involved
    pub outcome: Option<InstallOutcome>,
}

impl CtmError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            outcome: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_outcome(mut self, outcome: Option<InstallOutcome>) -> Self {
        self.outcome = outcome;
        self
    }
}

impl fmt::Display for CtmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CtmError {}

impl CtmError {
    /// Config file could not be used
    pub fn config(err: &ConfigError) -> Self {
        let error = CtmError::new(err.to_string());
        match err {
            ConfigError::Read { .. } => error
                .with_suggestion("Check the path given with --config or $CTM_CONFIG"),
            ConfigError::Parse { .. } | ConfigError::Invalid(_) => error
                .with_context("Known keys: crontab_bin, elevate_with, temp_command, remove_command, writer_command, services, require_service")
                .with_suggestion("Fix the file, or remove it to use built-in defaults"),
        }
    }

    /// A session operation failed for `target`
    pub fn session(err: &SessionError, target: &TargetIdentity) -> Self {
        let outcome = err.outcome();
        let user = target.effective_user();
        let error = match err {
            SessionError::Busy => CtmError::new("Another install is already running")
                .with_suggestion("Wait for it to finish, then retry"),
            SessionError::Document(DocumentError::Index { index, len }) => {
                CtmError::new(format!("No line {} in the crontab for '{}'", index, user))
                    .with_context(format!("The crontab has {} lines", len))
                    .with_suggestion("List line numbers: ctm list")
            }
            SessionError::Document(err) => CtmError::new(err.to_string())
                .with_context("A schedule has 5 to 7 whitespace-separated fields")
                .with_suggestion("Example: ctm add '*/10 * * * *' /usr/local/bin/job"),
            SessionError::Unsupported(reason) => {
                CtmError::new(format!("This host cannot modify crontabs: {}", reason))
                    .with_suggestion("Install cron, or set crontab_bin in the config file")
            }
            SessionError::Load(kind) => kind_error(
                format!("Failed to read the crontab for '{}'", user),
                kind,
                target,
            ),
            SessionError::Install(failure) => kind_error(
                format!(
                    "Failed to install the crontab for '{}' while {}",
                    user, failure.stage
                ),
                &failure.kind,
                target,
            ),
        };
        error.with_outcome(outcome)
    }
}

fn kind_error(message: String, kind: &FailureKind, target: &TargetIdentity) -> CtmError {
    let error = CtmError::new(message).with_context(kind.to_string());
    match kind {
        FailureKind::AccessDenied if target.requires_elevation() => error
            .with_context(format!(
                "Managing another account's crontab ('{}') needs elevated access",
                target.effective_user()
            ))
            .with_suggestion("Check that sudo works without a password prompt: sudo -n true")
            .with_suggestion("Or set elevate_with in the config file"),
        FailureKind::AccessDenied => error
            .with_context("This account may not be allowed to use cron (cron.allow / cron.deny)"),
        FailureKind::BinaryMissing => error
            .with_suggestion("Install cron, or set crontab_bin in the config file")
            .with_suggestion("Check what is available: ctm probe"),
        FailureKind::NoExistingCrontab | FailureKind::Generic(_) => error,
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
