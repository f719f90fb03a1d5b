// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ctm probe`

use crate::output::{self, OutputFormat};
use ctm_adapters::CommandAdapter;
use ctm_engine::{Capabilities, CrontabSession, ServiceStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ProbeReport(pub Capabilities);

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caps = &self.0;
        match &caps.crontab_path {
            Some(path) => writeln!(f, "crontab:  {}", path)?,
            None => writeln!(f, "crontab:  not found")?,
        }
        match &caps.service {
            ServiceStatus::Active(unit) => writeln!(f, "service:  {} (active)", unit)?,
            ServiceStatus::Inactive => writeln!(f, "service:  inactive")?,
            ServiceStatus::Unknown => writeln!(f, "service:  unknown")?,
        }
        let mutate = if caps.can_mutate { "yes" } else { "no" };
        write!(f, "writable: {}", mutate)
    }
}

pub async fn run<C: CommandAdapter>(
    session: &CrontabSession<C>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let caps = session.probe().await;
    output::print(&ProbeReport(caps), format);
    Ok(())
}
