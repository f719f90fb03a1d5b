// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crontab document model
//!
//! A crontab is kept as an ordered list of physical lines so that comments,
//! blank lines and entry ordering survive every edit. Mutations never touch
//! the input document; they return a new one.

use crate::schedule::is_valid_schedule;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from document mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("invalid schedule: {0:?}")]
    Validation(String),
    #[error("command must not be empty")]
    EmptyCommand,
    #[error("line index {index} out of range (document has {len} lines)")]
    Index { index: usize, len: usize },
}

/// Classification of a single crontab line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Entry,
    Comment,
    Blank,
}

impl LineKind {
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::Entry => "entry",
            LineKind::Comment => "comment",
            LineKind::Blank => "blank",
        }
    }

    fn classify(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') {
            LineKind::Comment
        } else {
            LineKind::Entry
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One physical line of a crontab file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub kind: LineKind,
    /// Exact line content, without the trailing newline
    pub text: String,
    /// Position in the text this line was parsed from. Only meaningful for
    /// diagnostics within one session; appended lines have no source position.
    pub original_index: Option<usize>,
}

impl Line {
    fn parsed(index: usize, text: &str) -> Self {
        Self {
            kind: LineKind::classify(text),
            text: text.to_string(),
            original_index: Some(index),
        }
    }

    fn entry(text: String) -> Self {
        Self {
            kind: LineKind::Entry,
            text,
            original_index: None,
        }
    }

    /// Best-effort split of an entry into schedule and command, for display.
    ///
    /// `@keyword` schedules take one token, everything else takes five fields.
    /// Returns `None` for comments, blanks and entries too short to split
    /// (environment assignments like `MAILTO=root` fall in the latter group).
    pub fn entry_parts(&self) -> Option<(&str, &str)> {
        match self.kind {
            LineKind::Comment | LineKind::Blank => None,
            LineKind::Entry => {
                let text = self.text.trim();
                let fields = if text.starts_with('@') { 1 } else { 5 };
                let split = field_boundary(text, fields)?;
                let (schedule, command) = text.split_at(split);
                let command = command.trim_start();
                if command.is_empty() {
                    None
                } else {
                    Some((schedule, command))
                }
            }
        }
    }
}

/// Byte offset just past the `n`th whitespace-separated field
fn field_boundary(text: &str, n: usize) -> Option<usize> {
    let mut seen = 0;
    let mut in_field = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_field {
                seen += 1;
                in_field = false;
                if seen == n {
                    return Some(i);
                }
            }
        } else {
            in_field = true;
        }
    }
    None
}

/// An ordered crontab document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrontabDocument {
    lines: Vec<Line>,
}

impl CrontabDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse raw crontab text. Never fails.
    ///
    /// Lines are split on `\n`; a `\r` left at the end of a line is dropped,
    /// so CRLF input is normalized to LF.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::empty();
        }

        let body = raw.strip_suffix('\n').unwrap_or(raw);
        let lines = body
            .split('\n')
            .enumerate()
            .map(|(i, text)| Line::parsed(i, text.strip_suffix('\r').unwrap_or(text)))
            .collect();

        Self { lines }
    }

    /// Render the document back to crontab text with a single trailing newline.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over entry lines with their current positions
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Line)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.kind == LineKind::Entry)
    }

    /// Return a new document with one entry appended.
    pub fn append_entry(&self, schedule: &str, command: &str) -> Result<Self, DocumentError> {
        validate_entry(schedule, command)?;

        let mut lines = self.lines.clone();
        lines.push(Line::entry(format!("{} {}", schedule.trim(), command.trim())));
        Ok(Self { lines })
    }

    /// Return a new document without the line currently at `index`.
    pub fn remove_entry_at(&self, index: usize) -> Result<Self, DocumentError> {
        if index >= self.lines.len() {
            return Err(DocumentError::Index {
                index,
                len: self.lines.len(),
            });
        }

        let mut lines = self.lines.clone();
        lines.remove(index);
        Ok(Self { lines })
    }
}

/// Check a new entry without touching any document
pub fn validate_entry(schedule: &str, command: &str) -> Result<(), DocumentError> {
    if !is_valid_schedule(schedule) {
        return Err(DocumentError::Validation(schedule.to_string()));
    }
    if command.trim().is_empty() {
        return Err(DocumentError::EmptyCommand);
    }
    Ok(())
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
