// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ctm replace`

use super::{session_error, InstallSummary};
use crate::output::{self, OutputFormat};
use anyhow::Context;
use ctm_adapters::CommandAdapter;
use ctm_core::CrontabDocument;
use ctm_engine::CrontabSession;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(clap::Args, Debug)]
pub struct ReplaceArgs {
    /// File holding the new crontab; `-` or omitted reads stdin
    pub file: Option<PathBuf>,
}

impl ReplaceArgs {
    fn from_stdin(&self) -> bool {
        match &self.file {
            Some(path) => path.as_os_str() == "-",
            None => true,
        }
    }
}

async fn read_input(args: &ReplaceArgs) -> anyhow::Result<String> {
    if args.from_stdin() {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("failed to read crontab from stdin")?;
        return Ok(text);
    }
    let path = args.file.clone().unwrap_or_default();
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

pub async fn run<C: CommandAdapter>(
    session: &CrontabSession<C>,
    args: ReplaceArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let text = read_input(&args).await?;
    let document = CrontabDocument::parse(&text);
    tracing::info!(lines = document.len(), "replacing crontab");

    let report = session
        .replace_all(document)
        .await
        .map_err(|err| session_error(session, err))?;

    let user = session.target().effective_user().to_string();
    output::print(&InstallSummary::new(&user, &report), format);
    Ok(())
}
