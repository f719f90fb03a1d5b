// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability probe
//!
//! A missing crontab executable disables every mutation. A missing or
//! inactive cron service only warrants a warning unless the config says
//! otherwise.

use crate::commands;
use crate::config::Config;
use ctm_adapters::CommandAdapter;
use ctm_core::Problem;
use serde::Serialize;

/// State of the cron service on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "unit", rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Named unit reported active
    Active(String),
    /// None of the configured units is active
    Inactive,
    /// Service state could not be queried (no systemctl)
    Unknown,
}

/// What the host can do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Resolved path of the crontab executable, if found
    pub crontab_path: Option<String>,
    pub service: ServiceStatus,
    /// Whether mutations may proceed
    pub can_mutate: bool,
}

impl Capabilities {
    pub fn has_crontab(&self) -> bool {
        self.crontab_path.is_some()
    }
}

/// Probe the host for the crontab executable and an active cron service.
pub async fn probe<C: CommandAdapter>(adapter: &C, config: &Config) -> Capabilities {
    let crontab_path = match adapter.execute(commands::locate_crontab(config)).await {
        Ok(output) => {
            let path = output.stdout.trim();
            Some(if path.is_empty() {
                config.crontab_bin.clone()
            } else {
                path.to_string()
            })
        }
        Err(e) => {
            tracing::error!(crontab = %config.crontab_bin, error = %e, "crontab executable not found");
            None
        }
    };

    let service = service_status(adapter, config).await;
    match &service {
        ServiceStatus::Active(unit) => tracing::debug!(unit = %unit, "cron service active"),
        ServiceStatus::Inactive => {
            tracing::warn!(units = ?config.services, "no cron service is active; jobs will not run")
        }
        ServiceStatus::Unknown => tracing::warn!("could not query cron service state"),
    }

    let service_ok = !config.require_service || matches!(service, ServiceStatus::Active(_));
    let can_mutate = crontab_path.is_some() && service_ok;

    Capabilities {
        crontab_path,
        service,
        can_mutate,
    }
}

async fn service_status<C: CommandAdapter>(adapter: &C, config: &Config) -> ServiceStatus {
    for unit in &config.services {
        match adapter.execute(commands::service_active(unit)).await {
            Ok(_) => return ServiceStatus::Active(unit.clone()),
            Err(e) if e.problem == Some(Problem::NotFound) => return ServiceStatus::Unknown,
            Err(_) => continue,
        }
    }
    ServiceStatus::Inactive
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
