// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install state machine
//!
//! An install walks a fixed sequence of stages. Once the temp file exists,
//! every path out of the sequence goes through `CleaningUp`.

use crate::classify::FailureKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A step of the install sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStage {
    CreatingTemp,
    Writing,
    Installing,
    CleaningUp,
    Reloading,
}

impl InstallStage {
    pub fn name(&self) -> &'static str {
        match self {
            InstallStage::CreatingTemp => "creating_temp",
            InstallStage::Writing => "writing",
            InstallStage::Installing => "installing",
            InstallStage::CleaningUp => "cleaning_up",
            InstallStage::Reloading => "reloading",
        }
    }

    /// Stage that follows a successful run of this one
    pub fn next(&self) -> Option<InstallStage> {
        match self {
            InstallStage::CreatingTemp => Some(InstallStage::Writing),
            InstallStage::Writing => Some(InstallStage::Installing),
            InstallStage::Installing => Some(InstallStage::CleaningUp),
            InstallStage::CleaningUp => Some(InstallStage::Reloading),
            InstallStage::Reloading => None,
        }
    }

    /// Whether the temp file exists while this stage runs
    pub fn holds_temp_file(&self) -> bool {
        matches!(
            self,
            InstallStage::Writing | InstallStage::Installing | InstallStage::CleaningUp
        )
    }
}

impl std::fmt::Display for InstallStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an install run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    Idle,
    Running(InstallStage),
    Done,
    Failed(InstallFailure),
}

/// Events that move an install run forward
#[derive(Debug, Clone)]
pub enum InstallEvent {
    Start,
    StageSucceeded,
    StageFailed(FailureKind),
}

impl InstallState {
    /// Pure transition function.
    ///
    /// A failure in a stage that holds the temp file routes through
    /// `CleaningUp`; the failure is parked in `pending` and becomes the
    /// terminal state once cleanup finishes, whether or not cleanup itself
    /// worked. A failure during `Reloading` does not fail the install.
    pub fn transition(
        self,
        event: InstallEvent,
        pending: &mut Option<InstallFailure>,
    ) -> InstallState {
        match (self, event) {
            (InstallState::Idle, InstallEvent::Start) => {
                InstallState::Running(InstallStage::CreatingTemp)
            }
            (InstallState::Running(InstallStage::CleaningUp), InstallEvent::Start) => {
                InstallState::Running(InstallStage::CleaningUp)
            }
            (InstallState::Running(InstallStage::CleaningUp), _) => match pending.take() {
                Some(failure) => InstallState::Failed(failure),
                None => InstallState::Running(InstallStage::Reloading),
            },
            (InstallState::Running(InstallStage::Reloading), InstallEvent::Start) => {
                InstallState::Running(InstallStage::Reloading)
            }
            (InstallState::Running(InstallStage::Reloading), _) => InstallState::Done,
            (InstallState::Running(stage), InstallEvent::StageSucceeded) => match stage.next() {
                Some(next) => InstallState::Running(next),
                None => InstallState::Done,
            },
            (InstallState::Running(stage), InstallEvent::StageFailed(kind)) => {
                let failure = InstallFailure { stage, kind };
                if stage.holds_temp_file() {
                    *pending = Some(failure);
                    InstallState::Running(InstallStage::CleaningUp)
                } else {
                    InstallState::Failed(failure)
                }
            }
            (state, _) => state,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InstallState::Done | InstallState::Failed(_))
    }
}

/// A failed install: the stage that failed and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("install failed while {stage}: {kind}")]
pub struct InstallFailure {
    pub stage: InstallStage,
    pub kind: FailureKind,
}

impl InstallFailure {
    pub fn outcome(&self) -> InstallOutcome {
        match &self.kind {
            FailureKind::AccessDenied => InstallOutcome::AccessDenied,
            FailureKind::BinaryMissing => InstallOutcome::BinaryMissing,
            FailureKind::NoExistingCrontab => InstallOutcome::NoExistingCrontab,
            FailureKind::Generic(detail) if self.stage.holds_temp_file() => {
                InstallOutcome::PartialFailure {
                    stage: self.stage,
                    detail: detail.clone(),
                }
            }
            FailureKind::Generic(detail) => InstallOutcome::Generic {
                detail: detail.clone(),
            },
        }
    }
}

/// Result of one install attempt, as reported to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InstallOutcome {
    Success,
    AccessDenied,
    BinaryMissing,
    NoExistingCrontab,
    PartialFailure { stage: InstallStage, detail: String },
    Generic { detail: String },
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
