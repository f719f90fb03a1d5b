// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install protocol specs

use crate::prelude::*;

#[test]
fn replace_from_stdin_installs_verbatim() {
    let host = Host::new();
    host.table("@daily old\n");

    host.ctm()
        .args(&["replace", "-"])
        .stdin("# new table\n\n30 2 * * 0 weekly 'quoted arg' $HOME\n")
        .passes();

    assert_eq!(
        host.installed().as_deref(),
        Some("# new table\n\n30 2 * * 0 weekly 'quoted arg' $HOME\n")
    );
}

#[test]
fn replace_from_file() {
    let host = Host::new();
    host.file("new.cron", "@monthly report");
    let path = host.path().join("new.cron");

    host.ctm()
        .args(&["replace", path.to_str().unwrap()])
        .passes();

    assert_eq!(host.installed().as_deref(), Some("@monthly report\n"));
}

#[test]
fn staging_file_is_removed_after_install() {
    let host = Host::new();

    host.ctm().args(&["add", "0 0 * * *", "true"]).passes();

    assert!(host.staged_files().is_empty());
}

#[test]
fn install_passes_staging_path_to_crontab() {
    let host = Host::new();

    host.ctm().args(&["add", "0 0 * * *", "true"]).passes();

    let calls = host.crontab_calls();
    let staging = host.staging_dir();
    assert!(calls
        .iter()
        .any(|call| call.starts_with(staging.to_str().unwrap())));
    // Read before the edit, then read back after installing
    assert_eq!(calls.iter().filter(|call| *call == "-l").count(), 2);
}

#[test]
fn install_reports_json_summary() {
    let host = Host::new();

    let run = host
        .ctm()
        .args(&["--format", "json", "add", "0 0 * * *", "true"])
        .passes();
    let summary: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(summary["outcome"], "success");
    assert_eq!(summary["user"], host_user().as_str());
    assert_eq!(summary["lines"], 1);
    assert!(summary["run_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[test]
fn probe_reports_crontab_path() {
    let host = Host::new();

    host.ctm()
        .args(&["probe"])
        .passes()
        .stdout_has("crontab:")
        .stdout_has("writable: yes");
}
