// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crontab session
//!
//! Holds what one operator is looking at: the target account, the document
//! last read from the host and the probed host capabilities. Mutations go
//! through [`InstallPipeline`], one at a time.

use crate::config::Config;
use crate::error::SessionError;
use crate::install::{InstallPipeline, InstallReport};
use crate::probe::{probe, Capabilities};
use crate::reader::read_crontab;
use ctm_adapters::CommandAdapter;
use ctm_core::{validate_entry, CrontabDocument, TargetIdentity};
use std::sync::{Arc, Mutex};

/// Result of a load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    Loaded(CrontabDocument),
    /// The target changed, or an install landed, while the read was in flight;
    /// the response was dropped
    Stale,
}

struct SessionState {
    target: TargetIdentity,
    /// Bumped whenever the target changes or an install lands
    generation: u64,
    document: Option<CrontabDocument>,
    capabilities: Option<Capabilities>,
}

/// Per-operator session over one host
#[derive(Clone)]
pub struct CrontabSession<C: CommandAdapter> {
    adapter: C,
    config: Arc<Config>,
    state: Arc<Mutex<SessionState>>,
    install_lock: Arc<tokio::sync::Mutex<()>>,
}

impl<C: CommandAdapter> CrontabSession<C> {
    pub fn new(adapter: C, config: Config, target: TargetIdentity) -> Self {
        Self {
            adapter,
            config: Arc::new(config),
            state: Arc::new(Mutex::new(SessionState {
                target,
                generation: 0,
                document: None,
                capabilities: None,
            })),
            install_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn target(&self) -> TargetIdentity {
        self.lock_state().target.clone()
    }

    /// Document as last read from the host, if any
    pub fn document(&self) -> Option<CrontabDocument> {
        self.lock_state().document.clone()
    }

    pub fn capabilities(&self) -> Option<Capabilities> {
        self.lock_state().capabilities.clone()
    }

    /// Switch the target account. `None` returns to the operator's own crontab.
    ///
    /// Any load still in flight for the previous target becomes stale.
    pub fn select_user(&self, user: Option<String>) {
        let mut state = self.lock_state();
        let current = state.target.current_user.clone();
        state.target = match user {
            Some(user) => TargetIdentity::own(current).with_selected(user),
            None => TargetIdentity::own(current),
        };
        state.generation += 1;
        state.document = None;
        tracing::info!(
            user = state.target.effective_user(),
            generation = state.generation,
            "target selected"
        );
    }

    /// Probe the host and remember the result
    pub async fn probe(&self) -> Capabilities {
        let caps = probe(&self.adapter, &self.config).await;
        self.lock_state().capabilities = Some(caps.clone());
        caps
    }

    /// Read the target's crontab from the host.
    ///
    /// A response that arrives after the target changed is dropped whether
    /// the read succeeded or failed.
    pub async fn load(&self) -> Result<LoadResult, SessionError> {
        let (target, generation) = self.snapshot();

        let result = read_crontab(&self.adapter, &self.config, &target).await;

        let mut state = self.lock_state();
        if state.generation != generation {
            tracing::debug!(
                requested = generation,
                current = state.generation,
                failed = result.is_err(),
                "discarding stale load"
            );
            return Ok(LoadResult::Stale);
        }
        let document = result.map_err(SessionError::Load)?;
        state.document = Some(document.clone());
        Ok(LoadResult::Loaded(document))
    }

    /// Append an entry and install the result.
    ///
    /// The entry is validated before the host is contacted.
    pub async fn add(&self, schedule: &str, command: &str) -> Result<InstallReport, SessionError> {
        validate_entry(schedule, command)?;
        let _guard = self.begin_install()?;
        self.ensure_mutable().await?;

        let (target, generation) = self.snapshot();
        let current = self.current_document(&target, generation).await?;
        let updated = current.append_entry(schedule, command)?;
        self.install(&target, generation, updated).await
    }

    /// Remove the line at `index` of the current document and install the result.
    ///
    /// Reads the crontab first when nothing is loaded yet.
    pub async fn delete(&self, index: usize) -> Result<InstallReport, SessionError> {
        let _guard = self.begin_install()?;
        self.ensure_mutable().await?;

        let (target, generation) = self.snapshot();
        let current = self.current_document(&target, generation).await?;
        let updated = current.remove_entry_at(index)?;
        self.install(&target, generation, updated).await
    }

    /// Install `document` wholesale
    pub async fn replace_all(
        &self,
        document: CrontabDocument,
    ) -> Result<InstallReport, SessionError> {
        let _guard = self.begin_install()?;
        self.ensure_mutable().await?;

        let (target, generation) = self.snapshot();
        self.install(&target, generation, document).await
    }

    fn snapshot(&self) -> (TargetIdentity, u64) {
        let state = self.lock_state();
        (state.target.clone(), state.generation)
    }

    fn begin_install(&self) -> Result<tokio::sync::OwnedMutexGuard<()>, SessionError> {
        self.install_lock.clone().try_lock_owned().map_err(|_| {
            tracing::warn!("install rejected: another install is running");
            SessionError::Busy
        })
    }

    async fn ensure_mutable(&self) -> Result<(), SessionError> {
        let caps = match self.capabilities() {
            Some(caps) => caps,
            None => self.probe().await,
        };
        if caps.can_mutate {
            return Ok(());
        }
        let reason = if caps.has_crontab() {
            "no cron service is active".to_string()
        } else {
            format!("{} executable not found", self.config.crontab_bin)
        };
        Err(SessionError::Unsupported(reason))
    }

    async fn current_document(
        &self,
        target: &TargetIdentity,
        generation: u64,
    ) -> Result<CrontabDocument, SessionError> {
        {
            let state = self.lock_state();
            if state.generation == generation {
                if let Some(doc) = &state.document {
                    return Ok(doc.clone());
                }
            }
        }
        read_crontab(&self.adapter, &self.config, target)
            .await
            .map_err(SessionError::Load)
    }

    async fn install(
        &self,
        target: &TargetIdentity,
        generation: u64,
        document: CrontabDocument,
    ) -> Result<InstallReport, SessionError> {
        let report = InstallPipeline::new(&self.adapter, &self.config)
            .run(target, &document)
            .await?;

        let mut state = self.lock_state();
        if state.generation == generation {
            state.document = Some(report.reloaded.clone().unwrap_or(document));
            // Reads started before the install are now out of date
            state.generation += 1;
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
