// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure classification
//!
//! `crontab` reports its interesting conditions only as text, so these are
//! matched by pattern. The pattern set is part of the compatibility surface:
//! anything unmatched is `Generic` with the original text kept for display.

use crate::command::{CommandFailure, Problem};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Printed by crontab -l when the account has no table yet
#[allow(clippy::expect_used)]
static NO_CRONTAB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)no crontab for").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static ACCESS_DENIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(permission denied|not permitted|not authorized|access denied|must be privileged|not allowed to|a password is required)",
    )
    .expect("constant regex pattern is valid")
});

/// Closed set of failure kinds surfaced to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureKind {
    AccessDenied,
    /// Not an error for reads: the account simply has no crontab yet
    NoExistingCrontab,
    BinaryMissing,
    Generic(String),
}

impl FailureKind {
    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::AccessDenied => "access_denied",
            FailureKind::NoExistingCrontab => "no_existing_crontab",
            FailureKind::BinaryMissing => "binary_missing",
            FailureKind::Generic(_) => "generic",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::AccessDenied => f.write_str("elevated access required"),
            FailureKind::NoExistingCrontab => f.write_str("no crontab installed"),
            FailureKind::BinaryMissing => f.write_str("required executable not found"),
            FailureKind::Generic(detail) => f.write_str(detail),
        }
    }
}

/// Map a raw command failure onto a [`FailureKind`].
pub fn classify(failure: &CommandFailure) -> FailureKind {
    match failure.problem {
        Some(Problem::AccessDenied | Problem::NotAuthorized) => return FailureKind::AccessDenied,
        Some(Problem::NotFound) => return FailureKind::BinaryMissing,
        None => {}
    }

    let captured = [failure.stderr.as_str(), failure.stdout.as_str()];

    if captured.iter().any(|text| NO_CRONTAB.is_match(text)) {
        return FailureKind::NoExistingCrontab;
    }
    if captured.iter().any(|text| ACCESS_DENIED.is_match(text)) {
        return FailureKind::AccessDenied;
    }

    FailureKind::Generic(failure.message())
}

/// Classify a failure raised by an install stage.
///
/// A missing executable is reported by capability probing before an install
/// starts. One that vanishes mid-install is an ordinary failure of that
/// stage, so it keeps its text as `Generic`.
pub fn classify_install(failure: &CommandFailure) -> FailureKind {
    match classify(failure) {
        FailureKind::BinaryMissing => FailureKind::Generic(failure.to_string()),
        kind => kind,
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
