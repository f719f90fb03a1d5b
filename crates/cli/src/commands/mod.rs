// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod add;
pub mod delete;
pub mod list;
pub mod probe;
pub mod replace;

use crate::error::CtmError;
use ctm_adapters::CommandAdapter;
use ctm_engine::{CrontabSession, InstallReport, SessionError};
use serde::Serialize;
use std::fmt;

/// Convert a session error into its user-facing form
pub(crate) fn session_error<C: CommandAdapter>(
    session: &CrontabSession<C>,
    err: SessionError,
) -> anyhow::Error {
    CtmError::session(&err, &session.target()).into()
}

/// What a successful mutation reports
#[derive(Debug, Serialize)]
pub struct InstallSummary {
    pub outcome: &'static str,
    pub user: String,
    pub run_id: String,
    /// Line count of the crontab as read back from the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload_error: Option<String>,
}

impl InstallSummary {
    pub fn new(user: &str, report: &InstallReport) -> Self {
        Self {
            outcome: "success",
            user: user.to_string(),
            run_id: report.run_id.clone(),
            lines: report.reloaded.as_ref().map(|doc| doc.len()),
            reload_error: report.reload_error.as_ref().map(|kind| kind.to_string()),
        }
    }
}

impl fmt::Display for InstallSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Installed crontab for '{}'", self.user)?;
        match (&self.lines, &self.reload_error) {
            (Some(1), _) => write!(f, " (1 line)"),
            (Some(n), _) => write!(f, " ({} lines)", n),
            (None, Some(err)) => write!(f, "; reading it back failed: {}", err),
            (None, None) => Ok(()),
        }
    }
}
