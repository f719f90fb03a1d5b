// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ctm - crontab manager with safe installs

mod commands;
mod completions;
mod error;
mod identity;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{add, delete, list, probe, replace};
use completions::CompletionsArgs;
use ctm_adapters::{ProcessAdapter, TracedCommandAdapter};
use ctm_core::TargetIdentity;
use ctm_engine::{Config, CrontabSession};
use error::CtmError;
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CTM_LOG";

#[derive(Parser)]
#[command(
    name = "ctm",
    version,
    about = "ctm - view and edit crontabs, installed through a staging file"
)]
struct Cli {
    /// Manage this account's crontab instead of your own
    #[arg(long, short = 'u', global = true)]
    user: Option<String>,

    /// Config file (default: $CTM_CONFIG, then <config dir>/ctm/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the crontab with line numbers
    List,
    /// Append an entry and install
    Add(add::AddArgs),
    /// Remove a line by number and install
    Delete(delete::DeleteArgs),
    /// Install a whole crontab from a file or stdin
    Replace(replace::ReplaceArgs),
    /// Check for the crontab executable and a running cron service
    Probe,
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let format = cli.format;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, format);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn report(err: &anyhow::Error, format: OutputFormat) {
    match err.downcast_ref::<CtmError>() {
        Some(ctm) => {
            if let (OutputFormat::Json, Some(outcome)) = (format, &ctm.outcome) {
                output::print_json(outcome);
            }
            eprint!("{}", ctm);
        }
        None => eprintln!("error: {:#}", err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions(args) = &cli.command {
        args.write::<Cli>(&mut std::io::stdout());
        return Ok(());
    }

    // Rejected entries never reach the host
    if let Commands::Add(args) = &cli.command {
        args.validate().map_err(|err| {
            CtmError::new(err.to_string())
                .with_context("A schedule has 5 to 7 whitespace-separated fields")
        })?;
    }

    let config = Config::discover(cli.config.as_deref()).map_err(|e| CtmError::config(&e))?;
    let adapter = TracedCommandAdapter::new(
        ProcessAdapter::new()
            .with_elevation(config.elevate_with.clone())
            .with_writer(config.writer_command.clone()),
    );

    let current = identity::current_user(&adapter, std::env::var("USER").ok()).await?;
    let target = match cli.user {
        Some(user) => TargetIdentity::own(current).with_selected(user),
        None => TargetIdentity::own(current),
    };
    tracing::debug!(
        user = target.effective_user(),
        elevate = target.requires_elevation(),
        "session target"
    );

    let session = CrontabSession::new(adapter, config, target);
    let format = cli.format;
    match cli.command {
        Commands::List => list::run(&session, format).await,
        Commands::Add(args) => add::run(&session, args, format).await,
        Commands::Delete(args) => delete::run(&session, args, format).await,
        Commands::Replace(args) => replace::run(&session, args, format).await,
        Commands::Probe => probe::run(&session, format).await,
        Commands::Completions(_) => Ok(()),
    }
}
