// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command adapter for testing
//!
//! Simulates just enough of a host to run the crontab workflow: per-user
//! crontabs, temp files, executables on PATH and cron services.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::CommandAdapter;
use async_trait::async_trait;
use ctm_core::{CommandFailure, CommandOutput, CommandRequest, Problem};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Host operations the fake understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeOp {
    Which,
    ServiceStatus,
    MakeTemp,
    WriteFile,
    InstallCrontab,
    ReadCrontab,
    RemoveFile,
    Identity,
    Unknown,
}

/// Recorded adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Execute { argv: Vec<String>, elevate: bool },
    WriteFile { path: String, content: String, elevate: bool },
}

impl FakeCall {
    pub fn op(&self) -> FakeOp {
        match self {
            FakeCall::Execute { argv, .. } => op_for(argv),
            FakeCall::WriteFile { .. } => FakeOp::WriteFile,
        }
    }
}

/// Suspends the next matching call until released
#[derive(Clone, Default)]
pub struct FakeGate {
    arrived: Arc<Notify>,
    release: Arc<Notify>,
}

impl FakeGate {
    /// Wait until a call has reached the gate
    pub async fn arrived(&self) {
        self.arrived.notified().await;
    }

    /// Let the held call continue
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Default)]
struct FakeHost {
    crontabs: HashMap<String, String>,
    files: BTreeMap<String, String>,
    binaries: BTreeSet<String>,
    active_services: BTreeSet<String>,
    failures: HashMap<FakeOp, VecDeque<CommandFailure>>,
    gates: HashMap<FakeOp, FakeGate>,
    next_temp: u64,
}

/// Fake command adapter for testing
#[derive(Clone)]
pub struct FakeCommandAdapter {
    current_user: String,
    host: Arc<Mutex<FakeHost>>,
    calls: Arc<Mutex<Vec<FakeCall>>>,
}

fn program_name(argv: &[String]) -> &str {
    argv.first()
        .map(|p| p.rsplit('/').next().unwrap_or(p))
        .unwrap_or("")
}

fn op_for(argv: &[String]) -> FakeOp {
    match program_name(argv) {
        "which" => FakeOp::Which,
        "systemctl" => FakeOp::ServiceStatus,
        "mktemp" => FakeOp::MakeTemp,
        "rm" => FakeOp::RemoveFile,
        "id" => FakeOp::Identity,
        "crontab" if argv.iter().any(|a| a == "-l") => FakeOp::ReadCrontab,
        "crontab" => FakeOp::InstallCrontab,
        _ => FakeOp::Unknown,
    }
}

impl FakeCommandAdapter {
    /// A host where `current_user` is logged in, with cron installed and running
    pub fn new(current_user: impl Into<String>) -> Self {
        let host = FakeHost {
            binaries: ["crontab", "id", "mktemp", "rm", "tee", "systemctl", "which"]
                .into_iter()
                .map(String::from)
                .collect(),
            active_services: BTreeSet::from(["cron".to_string()]),
            ..FakeHost::default()
        };
        Self {
            current_user: current_user.into(),
            host: Arc::new(Mutex::new(host)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Operations performed, in order
    pub fn ops(&self) -> Vec<FakeOp> {
        self.calls().iter().map(FakeCall::op).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Installed crontab for a user
    pub fn crontab(&self, user: &str) -> Option<String> {
        self.host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .crontabs
            .get(user)
            .cloned()
    }

    pub fn set_crontab(&self, user: &str, content: &str) {
        self.host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .crontabs
            .insert(user.to_string(), content.to_string());
    }

    /// Paths of files currently on the fake host
    pub fn files(&self) -> Vec<String> {
        self.host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .files
            .keys()
            .cloned()
            .collect()
    }

    pub fn remove_binary(&self, name: &str) {
        self.host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .binaries
            .remove(name);
    }

    pub fn set_service_active(&self, name: &str, active: bool) {
        let mut host = self.host.lock().unwrap_or_else(|e| e.into_inner());
        if active {
            host.active_services.insert(name.to_string());
        } else {
            host.active_services.remove(name);
        }
    }

    /// Make the next call of `op` fail with `failure`
    pub fn fail_next(&self, op: FakeOp, failure: CommandFailure) {
        self.host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .failures
            .entry(op)
            .or_default()
            .push_back(failure);
    }

    /// Hold the next call of `op` until the returned gate is released
    pub fn gate(&self, op: FakeOp) -> FakeGate {
        let gate = FakeGate::default();
        self.host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gates
            .insert(op, gate.clone());
        gate
    }

    fn record(&self, call: FakeCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    /// Wait at the gate for `op` if one is set, then take any scripted failure
    async fn intercept(&self, op: FakeOp) -> Option<CommandFailure> {
        let gate = self
            .host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gates
            .remove(&op);
        if let Some(gate) = gate {
            gate.arrived.notify_one();
            gate.release.notified().await;
        }

        self.host
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .failures
            .get_mut(&op)
            .and_then(VecDeque::pop_front)
    }

    fn run(&self, argv: &[String], elevate: bool) -> Result<CommandOutput, CommandFailure> {
        let mut host = self.host.lock().unwrap_or_else(|e| e.into_inner());
        let program = program_name(argv);
        if !host.binaries.contains(program) {
            return Err(CommandFailure::new(argv)
                .with_stderr(format!("{}: command not found", program))
                .with_problem(Problem::NotFound));
        }

        match op_for(argv) {
            FakeOp::Which => {
                let name = argv.get(1).map(String::as_str).unwrap_or("");
                if host.binaries.contains(name) {
                    Ok(CommandOutput::with_stdout(format!("/usr/bin/{}\n", name)))
                } else {
                    Err(CommandFailure::new(argv).with_exit_status(1))
                }
            }
            FakeOp::ServiceStatus => {
                let name = argv.last().map(String::as_str).unwrap_or("");
                if host.active_services.contains(name) {
                    Ok(CommandOutput::with_stdout("active\n"))
                } else {
                    Err(CommandFailure::new(argv)
                        .with_stdout("inactive\n")
                        .with_exit_status(3))
                }
            }
            FakeOp::MakeTemp => {
                host.next_temp += 1;
                let path = format!("/tmp/crontab.fake{}", host.next_temp);
                host.files.insert(path.clone(), String::new());
                Ok(CommandOutput::with_stdout(format!("{}\n", path)))
            }
            FakeOp::Identity => Ok(CommandOutput::with_stdout(format!("{}\n", self.current_user))),
            FakeOp::RemoveFile => {
                if let Some(path) = argv.last() {
                    host.files.remove(path);
                }
                Ok(CommandOutput::default())
            }
            FakeOp::ReadCrontab | FakeOp::InstallCrontab => {
                let user = match argv.iter().position(|a| a == "-u") {
                    Some(i) => argv.get(i + 1).cloned().unwrap_or_default(),
                    None => self.current_user.clone(),
                };
                if user != self.current_user && !elevate {
                    return Err(CommandFailure::new(argv)
                        .with_stderr("must be privileged to use -u")
                        .with_exit_status(1));
                }

                if op_for(argv) == FakeOp::ReadCrontab {
                    return match host.crontabs.get(&user) {
                        Some(content) => Ok(CommandOutput::with_stdout(content.clone())),
                        None => Err(CommandFailure::new(argv)
                            .with_stderr(format!("no crontab for {}\n", user))
                            .with_exit_status(1)),
                    };
                }

                let path = argv.last().cloned().unwrap_or_default();
                match host.files.get(&path).cloned() {
                    Some(content) => {
                        host.crontabs.insert(user, content);
                        Ok(CommandOutput::default())
                    }
                    None => Err(CommandFailure::new(argv)
                        .with_stderr(format!("{}: No such file or directory", path))
                        .with_exit_status(1)),
                }
            }
            FakeOp::WriteFile | FakeOp::Unknown => Err(CommandFailure::new(argv)
                .with_stderr("unsupported by fake host")
                .with_exit_status(127)),
        }
    }
}

#[async_trait]
impl CommandAdapter for FakeCommandAdapter {
    async fn execute(&self, request: CommandRequest) -> Result<CommandOutput, CommandFailure> {
        self.record(FakeCall::Execute {
            argv: request.argv.clone(),
            elevate: request.elevate,
        });

        if let Some(failure) = self.intercept(op_for(&request.argv)).await {
            return Err(failure);
        }
        self.run(&request.argv, request.elevate)
    }

    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        elevate: bool,
    ) -> Result<(), CommandFailure> {
        let content = String::from_utf8_lossy(content).to_string();
        self.record(FakeCall::WriteFile {
            path: path.to_string(),
            content: content.clone(),
            elevate,
        });

        if let Some(failure) = self.intercept(FakeOp::WriteFile).await {
            return Err(failure);
        }

        let mut host = self.host.lock().unwrap_or_else(|e| e.into_inner());
        match host.files.get_mut(path) {
            Some(file) => {
                *file = content;
                Ok(())
            }
            None => Err(CommandFailure::new(&["tee".to_string(), path.to_string()])
                .with_stderr(format!("tee: {}: No such file or directory", path))
                .with_exit_status(1)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
