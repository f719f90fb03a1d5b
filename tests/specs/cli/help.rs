// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and completion specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let run = cli().args(&["--help"]).passes();
    let stdout = run.stdout();
    for command in ["list", "add", "delete", "replace", "probe", "completions"] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn add_help_describes_schedule() {
    cli()
        .args(&["add", "--help"])
        .passes()
        .stdout_has("Schedule expression");
}

#[test]
fn version_flag() {
    cli().args(&["--version"]).passes().stdout_has("ctm");
}

#[test]
fn completions_need_no_host() {
    cli()
        .args(&["completions", "bash"])
        .env("CTM_CONFIG", "/nonexistent/ctm.toml")
        .passes()
        .stdout_has("ctm");
}

#[test]
fn missing_subcommand_fails() {
    cli().fails().stderr_has("Usage");
}
