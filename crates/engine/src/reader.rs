// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crontab read path

use crate::commands;
use crate::config::Config;
use ctm_adapters::CommandAdapter;
use ctm_core::{classify, CrontabDocument, FailureKind, TargetIdentity};

/// Read and parse the target's crontab.
///
/// An account without a crontab reads as an empty document.
pub async fn read_crontab<C: CommandAdapter>(
    adapter: &C,
    config: &Config,
    target: &TargetIdentity,
) -> Result<CrontabDocument, FailureKind> {
    match adapter.execute(commands::read_crontab(config, target)).await {
        Ok(output) => Ok(CrontabDocument::parse(&output.stdout)),
        Err(failure) => match classify(&failure) {
            FailureKind::NoExistingCrontab => {
                tracing::debug!(user = target.effective_user(), "no crontab installed");
                Ok(CrontabDocument::empty())
            }
            kind => Err(kind),
        },
    }
}
