// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ctm_core::{InstallFailure, InstallStage};

#[test]
fn error_display() {
    let err = CtmError::new("Something went wrong")
        .with_context("First context")
        .with_context("Second context")
        .with_suggestion("Try this")
        .with_suggestion("Or this");

    let output = format!("{}", err);
    assert!(output.contains("error: Something went wrong"));
    assert!(output.contains("-> First context"));
    assert!(output.contains("-> Second context"));
    assert!(output.contains("1. Try this"));
    assert!(output.contains("2. Or this"));
}

#[test]
fn denied_install_for_other_user_suggests_sudo() {
    let target = TargetIdentity::own("alice").with_selected("bob");
    let err = SessionError::Install(InstallFailure {
        stage: InstallStage::Installing,
        kind: FailureKind::AccessDenied,
    });

    let err = CtmError::session(&err, &target);

    let output = err.to_string();
    assert!(output.contains("crontab for 'bob' while installing"));
    assert!(output.contains("sudo -n true"));
    assert_eq!(err.outcome, Some(InstallOutcome::AccessDenied));
}

#[test]
fn busy_has_no_outcome() {
    let err = CtmError::session(&SessionError::Busy, &TargetIdentity::own("alice"));

    assert!(err.to_string().contains("already running"));
    assert_eq!(err.outcome, None);
}

#[test]
fn index_error_names_line_count() {
    let err = SessionError::Document(DocumentError::Index { index: 9, len: 3 });

    let output = CtmError::session(&err, &TargetIdentity::own("alice")).to_string();

    assert!(output.contains("No line 9"));
    assert!(output.contains("has 3 lines"));
}

#[test]
fn invalid_config_lists_known_keys() {
    let err = ConfigError::Invalid("crontab_bin must not be empty".into());

    let output = CtmError::config(&err).to_string();

    assert!(output.contains("crontab_bin must not be empty"));
    assert!(output.contains("Known keys"));
}
