// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for crontab sessions

use ctm_core::{DocumentError, FailureKind, InstallFailure, InstallOutcome};
use thiserror::Error;

/// Errors that can occur in a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("an install is already running for this session")]
    Busy,
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("host cannot modify crontabs: {0}")]
    Unsupported(String),
    #[error("failed to load crontab: {0}")]
    Load(FailureKind),
    #[error(transparent)]
    Install(#[from] InstallFailure),
}

impl SessionError {
    /// Outcome to report, for errors that came from the host
    pub fn outcome(&self) -> Option<InstallOutcome> {
        match self {
            SessionError::Install(failure) => Some(failure.outcome()),
            SessionError::Load(kind) => Some(match kind {
                FailureKind::AccessDenied => InstallOutcome::AccessDenied,
                FailureKind::BinaryMissing => InstallOutcome::BinaryMissing,
                FailureKind::NoExistingCrontab => InstallOutcome::NoExistingCrontab,
                FailureKind::Generic(detail) => InstallOutcome::Generic {
                    detail: detail.clone(),
                },
            }),
            SessionError::Unsupported(_) => Some(InstallOutcome::BinaryMissing),
            SessionError::Busy | SessionError::Document(_) => None,
        }
    }
}
