// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ctm list`

use super::session_error;
use crate::output::{self, OutputFormat};
use ctm_adapters::CommandAdapter;
use ctm_core::{CrontabDocument, Line, LineKind};
use ctm_engine::{CrontabSession, LoadResult};
use serde::Serialize;
use std::fmt;

/// A crontab line as shown to the operator
#[derive(Debug, Serialize)]
pub struct ListedLine {
    pub index: usize,
    pub kind: LineKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl ListedLine {
    fn new(index: usize, line: &Line) -> Self {
        let parts = line.entry_parts();
        Self {
            index,
            kind: line.kind,
            text: line.text.clone(),
            schedule: parts.map(|(schedule, _)| schedule.to_string()),
            command: parts.map(|(_, command)| command.to_string()),
        }
    }
}

impl fmt::Display for ListedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.schedule, &self.command) {
            (Some(schedule), Some(command)) => {
                write!(f, "{:>4}  {:<20} {}", self.index, schedule, command)
            }
            _ => write!(f, "{:>4}  {}", self.index, self.text),
        }
    }
}

pub fn rows(document: &CrontabDocument) -> Vec<ListedLine> {
    document
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| ListedLine::new(index, line))
        .collect()
}

pub async fn run<C: CommandAdapter>(
    session: &CrontabSession<C>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let document = match session.load().await {
        Ok(LoadResult::Loaded(document)) => document,
        Ok(LoadResult::Stale) => anyhow::bail!("target changed while reading the crontab"),
        Err(err) => return Err(session_error(session, err)),
    };

    let user = session.target().effective_user().to_string();
    output::print_list(
        &rows(&document),
        format,
        &format!("no crontab for {}", user),
    );
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
