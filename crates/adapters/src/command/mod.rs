// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host command execution adapters

mod process;

pub use process::ProcessAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCall, FakeCommandAdapter, FakeGate, FakeOp};

use async_trait::async_trait;
use ctm_core::{CommandFailure, CommandOutput, CommandRequest};

/// Adapter for running commands on the managed host
#[async_trait]
pub trait CommandAdapter: Clone + Send + Sync + 'static {
    /// Run a fixed executable with an argument vector
    async fn execute(&self, request: CommandRequest) -> Result<CommandOutput, CommandFailure>;

    /// Replace the contents of `path` with `content`.
    ///
    /// The bytes travel as data on the writer's stdin, never on a command
    /// line, so they may contain anything.
    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        elevate: bool,
    ) -> Result<(), CommandFailure>;
}
