// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error reporting specs

use crate::prelude::*;

#[test]
fn invalid_schedule_is_rejected_before_host_contact() {
    let host = Host::new();

    host.ctm()
        .args(&["add", "* * * *", "echo", "hi"])
        .fails()
        .stderr_has("invalid schedule");

    assert!(host.crontab_calls().is_empty());
    assert!(host.installed().is_none());
}

#[test]
fn eight_field_schedule_is_rejected() {
    let host = Host::new();

    host.ctm()
        .args(&["add", "* * * * * * * *", "true"])
        .fails()
        .stderr_has("invalid schedule");

    assert!(host.crontab_calls().is_empty());
}

#[test]
fn blank_command_is_rejected() {
    let host = Host::new();

    let run = host.ctm().args(&["add", "0 0 * * *", "  "]).fails();

    assert!(run.stderr().starts_with("error: command must not be empty\n"));

    assert!(host.crontab_calls().is_empty());
}

#[test]
fn unknown_config_key_is_reported() {
    let host = Host::new();
    host.file("bad.toml", "crontab_binary = \"crontab\"\n");

    cli()
        .config(&host.path().join("bad.toml"))
        .args(&["list"])
        .fails()
        .stderr_has("failed to parse config")
        .stderr_has("Known keys");
}

#[test]
fn missing_config_file_is_reported() {
    let host = Host::new();

    cli()
        .config(&host.path().join("absent.toml"))
        .args(&["list"])
        .fails()
        .stderr_has("failed to read config");
}

#[test]
fn config_from_environment_is_used() {
    let host = Host::new();
    host.table("@daily from-env\n");

    cli()
        .env("CTM_CONFIG", host.config_path().to_str().unwrap())
        .args(&["list"])
        .passes()
        .stdout_has("from-env");
}

#[test]
fn delete_out_of_range_changes_nothing() {
    let host = Host::new();
    host.table("@daily keep\n");

    host.ctm()
        .args(&["delete", "4"])
        .fails()
        .stderr_has("No line 4")
        .stderr_has("has 1 lines");

    assert_eq!(host.installed().as_deref(), Some("@daily keep\n"));
    assert!(host.staged_files().is_empty());
}

#[test]
fn denied_install_reports_access_and_cleans_up() {
    let host = Host::new();

    host.ctm()
        .args(&["replace", "-"])
        .stdin("@daily true\n")
        .env("CTM_FAKE_DENY", "1")
        .fails()
        .stderr_has("elevated access required");

    assert!(host.installed().is_none());
    assert!(host.staged_files().is_empty());
}

#[test]
fn denied_install_json_outcome() {
    let host = Host::new();

    host.ctm()
        .args(&["--format", "json", "replace"])
        .stdin("@daily true\n")
        .env("CTM_FAKE_DENY", "1")
        .fails()
        .stdout_has("\"outcome\": \"access_denied\"");
}

#[test]
fn missing_crontab_binary_blocks_mutation() {
    let host = Host::new();
    host.file(
        "nobin.toml",
        &format!(
            "crontab_bin = \"{}\"\nservices = []\n",
            host.path().join("no-such-crontab").display()
        ),
    );

    cli()
        .config(&host.path().join("nobin.toml"))
        .args(&["add", "0 0 * * *", "true"])
        .fails()
        .stderr_has("cannot modify crontabs");
}
