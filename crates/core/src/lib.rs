// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ctm-core: crontab document model and failure taxonomy
//!
//! This crate provides:
//! - An order-preserving crontab document with pure append/remove
//! - Structural schedule validation
//! - Target identity and elevation policy
//! - Command request/result shapes and failure classification
//! - Install stages and outcomes

pub mod classify;
pub mod command;
pub mod document;
pub mod identity;
pub mod install;
pub mod schedule;

pub use classify::{classify, classify_install, FailureKind};
pub use command::{CommandFailure, CommandOutput, CommandRequest, Problem};
pub use document::{validate_entry, CrontabDocument, DocumentError, Line, LineKind};
pub use identity::TargetIdentity;
pub use install::{InstallEvent, InstallFailure, InstallOutcome, InstallStage, InstallState};
pub use schedule::is_valid_schedule;
