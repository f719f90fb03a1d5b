// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

fn args(argv: &[&str]) -> Vec<String> {
    argv.iter().map(|s| s.to_string()).collect()
}

#[test]
fn elevation_prefixes_wrapper() {
    let adapter = ProcessAdapter::new();
    assert_eq!(
        adapter.full_argv(&args(&["crontab", "-l"]), true),
        args(&["sudo", "-n", "crontab", "-l"])
    );
    assert_eq!(
        adapter.full_argv(&args(&["crontab", "-l"]), false),
        args(&["crontab", "-l"])
    );
}

#[tokio::test]
async fn execute_captures_stdout() {
    let adapter = ProcessAdapter::new();
    let output = adapter
        .execute(CommandRequest::new(["echo", "hello"]))
        .await
        .unwrap();

    assert_eq!(output.stdout, "hello\n");
    assert_eq!(output.exit_status, 0);
}

#[tokio::test]
async fn execute_reports_nonzero_exit() {
    let adapter = ProcessAdapter::new();
    let failure = adapter
        .execute(CommandRequest::new(["ls", "/nonexistent/ctm-test-path"]))
        .await
        .unwrap_err();

    assert!(failure.exit_status.is_some_and(|s| s != 0));
    assert!(!failure.stderr.is_empty());
    assert_eq!(failure.problem, None);
}

#[tokio::test]
async fn missing_executable_is_not_found() {
    let adapter = ProcessAdapter::new();
    let failure = adapter
        .execute(CommandRequest::new(["ctm-definitely-not-a-binary"]))
        .await
        .unwrap_err();

    assert_eq!(failure.problem, Some(Problem::NotFound));
    assert_eq!(failure.exit_status, None);
}

#[tokio::test]
async fn empty_argv_is_rejected() {
    let adapter = ProcessAdapter::new();
    let failure = adapter
        .execute(CommandRequest::new(Vec::<String>::new()))
        .await
        .unwrap_err();

    assert!(failure.stderr.contains("empty command line"));
}

#[tokio::test]
async fn elevated_request_runs_through_wrapper() {
    // `env` runs its arguments as a command, standing in for sudo
    let adapter = ProcessAdapter::new().with_elevation(args(&["env"]));
    let output = adapter
        .execute(CommandRequest::new(["echo", "elevated"]).elevated(true))
        .await
        .unwrap();

    assert_eq!(output.stdout, "elevated\n");
}

#[tokio::test]
async fn write_file_streams_arbitrary_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crontab.tmp");
    let content = "# quotes ' \" and $(subshell) `ticks`\n* * * * * echo \"$HOME\" \\\n\x07\n";

    let adapter = ProcessAdapter::new();
    adapter
        .write_file(path.to_str().unwrap(), content.as_bytes(), false)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[tokio::test]
async fn write_file_replaces_existing_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crontab.tmp");
    std::fs::write(&path, "old content that is longer\n").unwrap();

    let adapter = ProcessAdapter::new();
    adapter
        .write_file(path.to_str().unwrap(), b"new\n", false)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
}

#[tokio::test]
async fn write_file_into_missing_directory_fails() {
    let adapter = ProcessAdapter::new();
    let failure = adapter
        .write_file("/nonexistent/ctm-dir/file", b"x\n", false)
        .await
        .unwrap_err();

    assert!(failure.exit_status.is_some_and(|s| s != 0));
}
