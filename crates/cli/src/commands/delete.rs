// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ctm delete`

use super::{session_error, InstallSummary};
use crate::output::{self, OutputFormat};
use ctm_adapters::CommandAdapter;
use ctm_engine::{CrontabSession, LoadResult};

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Line number as shown by `ctm list`
    pub index: usize,
}

pub async fn run<C: CommandAdapter>(
    session: &CrontabSession<C>,
    args: DeleteArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match session.load().await {
        Ok(LoadResult::Loaded(_)) => {}
        Ok(LoadResult::Stale) => anyhow::bail!("target changed while reading the crontab"),
        Err(err) => return Err(session_error(session, err)),
    }

    let report = session
        .delete(args.index)
        .await
        .map_err(|err| session_error(session, err))?;

    let user = session.target().effective_user().to_string();
    output::print(&InstallSummary::new(&user, &report), format);
    Ok(())
}
