// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! List/add/delete specs

use crate::prelude::*;

#[test]
fn list_without_crontab_is_empty() {
    let host = Host::new();

    host.ctm()
        .args(&["list"])
        .passes()
        .stdout_eq(&format!("no crontab for {}\n", host_user()));
}

#[test]
fn list_shows_numbered_lines() {
    let host = Host::new();
    host.table("# backups\n0 3 * * * /opt/backup\n");

    host.ctm()
        .args(&["list"])
        .passes()
        .stdout_has("   0  # backups")
        .stdout_has("   1  0 3 * * *")
        .stdout_has("/opt/backup");
}

#[test]
fn list_json_splits_entries() {
    let host = Host::new();
    host.table("@reboot start-agent --fg\n");

    let run = host.ctm().args(&["--format", "json", "list"]).passes();
    let rows: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(rows[0]["kind"], "entry");
    assert_eq!(rows[0]["schedule"], "@reboot");
    assert_eq!(rows[0]["command"], "start-agent --fg");
}

#[test]
fn add_appends_to_existing_table() {
    let host = Host::new();
    host.table("# keep this comment\nMAILTO=ops\n\n0 0 * * * rotate\n");

    host.ctm()
        .args(&["add", "*/15 * * * *", "/usr/bin/poll", "--quiet"])
        .passes()
        .stdout_has(&format!("Installed crontab for '{}' (5 lines)", host_user()));

    similar_asserts::assert_eq!(
        host.installed().unwrap(),
        "# keep this comment\nMAILTO=ops\n\n0 0 * * * rotate\n*/15 * * * * /usr/bin/poll --quiet\n"
    );
}

#[test]
fn add_creates_first_table() {
    let host = Host::new();

    host.ctm().args(&["add", "0 * * * *", "true"]).passes();

    assert_eq!(host.installed().as_deref(), Some("0 * * * * true\n"));
}

#[test]
fn delete_removes_only_that_line() {
    let host = Host::new();
    host.table("# a\n@daily one\n@daily two\n");

    host.ctm().args(&["delete", "1"]).passes();

    assert_eq!(host.installed().as_deref(), Some("# a\n@daily two\n"));
}

#[test]
fn crlf_input_is_normalized() {
    let host = Host::new();
    host.table("# windows\r\n@daily job\r\n");

    host.ctm().args(&["add", "0 0 * * 0", "other"]).passes();

    assert_eq!(
        host.installed().as_deref(),
        Some("# windows\n@daily job\n0 0 * * 0 other\n")
    );
}
