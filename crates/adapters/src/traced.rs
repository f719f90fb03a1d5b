// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::command::CommandAdapter;
use async_trait::async_trait;
use ctm_core::{CommandFailure, CommandOutput, CommandRequest};
use tracing::Instrument;

/// Wrapper that adds tracing to any CommandAdapter
#[derive(Clone)]
pub struct TracedCommandAdapter<C> {
    inner: C,
}

impl<C> TracedCommandAdapter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: CommandAdapter> CommandAdapter for TracedCommandAdapter<C> {
    async fn execute(&self, request: CommandRequest) -> Result<CommandOutput, CommandFailure> {
        let span = tracing::info_span!(
            "command.execute",
            program = request.program(),
            elevate = request.elevate
        );

        async move {
            tracing::debug!(argv = ?request.argv, "starting");

            // Precondition: something to run
            if request.argv.is_empty() {
                tracing::error!("empty argument vector");
                return Err(CommandFailure::new(&request.argv).with_stderr("empty command line"));
            }

            let start = std::time::Instant::now();
            let result = self.inner.execute(request).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(output) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    stdout_len = output.stdout.len(),
                    "completed"
                ),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    exit_status = ?e.exit_status,
                    problem = ?e.problem,
                    error = %e,
                    "failed (may be expected)"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        elevate: bool,
    ) -> Result<(), CommandFailure> {
        let span = tracing::info_span!("command.write_file", path, elevate);

        async move {
            tracing::debug!(bytes = content.len(), "writing");

            let start = std::time::Instant::now();
            let result = self.inner.write_file(path, content, elevate).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "written"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "write failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
