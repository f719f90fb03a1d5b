// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ctm add`

use super::{session_error, InstallSummary};
use crate::output::{self, OutputFormat};
use ctm_adapters::CommandAdapter;
use ctm_core::{validate_entry, DocumentError};
use ctm_engine::CrontabSession;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Schedule expression of 5 to 7 fields, e.g. '*/5 * * * *'
    pub schedule: String,
    /// Command to run; remaining arguments are joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl AddArgs {
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Local check, run before the host is contacted at all
    pub fn validate(&self) -> Result<(), DocumentError> {
        validate_entry(&self.schedule, &self.command_line())
    }
}

pub async fn run<C: CommandAdapter>(
    session: &CrontabSession<C>,
    args: AddArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let report = session
        .add(&args.schedule, &args.command_line())
        .await
        .map_err(|err| session_error(session, err))?;

    let user = session.target().effective_user().to_string();
    output::print(&InstallSummary::new(&user, &report), format);
    Ok(())
}
