// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for behavioral specs
//!
//! `Host` builds a scratch directory with a scripted `crontab` executable and
//! a config file pointing at it, so specs exercise the real process adapter
//! without touching the machine's cron.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Stand-in for the crontab executable.
///
/// Stores one table in `$dir/table`, logs each invocation to `$dir/calls`.
const FAKE_CRONTAB: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
echo "$*" >> "$dir/calls"
if [ -n "$CTM_FAKE_DENY" ]; then
    echo "crontab: Permission denied" >&2
    exit 1
fi
case "$1" in
    -l)
        if [ -f "$dir/table" ]; then
            cat "$dir/table"
        else
            echo "no crontab for $(id -un)" >&2
            exit 1
        fi
        ;;
    *)
        cp "$1" "$dir/table"
        ;;
esac
"#;

pub struct Host {
    dir: tempfile::TempDir,
}

impl Host {
    /// Scratch host with no crontab installed
    pub fn new() -> Self {
        let host = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        host.install_fake_crontab();
        std::fs::create_dir(host.staging_dir()).unwrap();
        host.file("config.toml", &host.config());
        host
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.path().join("staging")
    }

    fn config(&self) -> String {
        format!(
            r#"crontab_bin = "{bin}"
temp_command = ["mktemp", "{staging}/crontab.XXXXXX"]
services = []
"#,
            bin = self.path().join("crontab").display(),
            staging = self.staging_dir().display(),
        )
    }

    fn install_fake_crontab(&self) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join("crontab");
        std::fs::write(&path, FAKE_CRONTAB).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Write a file relative to the host directory
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Seed the installed crontab
    pub fn table(&self, content: &str) {
        self.file("table", content);
    }

    /// Installed crontab, if any
    pub fn installed(&self) -> Option<String> {
        std::fs::read_to_string(self.path().join("table")).ok()
    }

    /// Arguments the fake crontab was invoked with, one call per entry
    pub fn crontab_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("calls"))
            .map(|text| text.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn staged_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.staging_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    /// `ctm` configured against this host
    pub fn ctm(&self) -> CliBuilder {
        cli().config(&self.config_path())
    }
}

/// Account the specs run as, which ctm reports regardless of `$USER`
pub fn host_user() -> String {
    let output = std::process::Command::new("id").arg("-un").output().unwrap();
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// `ctm` with a clean environment and no config
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    fn new() -> Self {
        let mut cmd = Command::cargo_bin("ctm").unwrap();
        // Deliberately wrong; ctm must ask the host who is running it
        cmd.env("USER", "not-the-host-user")
            .env_remove("CTM_CONFIG")
            .env_remove("CTM_LOG");
        Self { cmd }
    }

    pub fn config(mut self, path: &Path) -> Self {
        self.cmd.arg("--config").arg(path);
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input);
        self
    }

    /// Run and expect success
    pub fn passes(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().success())
    }

    /// Run and expect failure
    pub fn fails(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().failure())
    }
}

pub struct RunAssert(assert_cmd::assert::Assert);

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stderr).to_string()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self(
            self.0
                .stdout(predicates::str::contains(expected)),
        )
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self(
            self.0
                .stderr(predicates::str::contains(expected)),
        )
    }

    /// Exact stdout, with a readable diff on mismatch
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }
}
