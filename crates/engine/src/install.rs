// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install pipeline
//!
//! Replaces a crontab through a staging file:
//! create temp -> write content -> `crontab <temp>` -> remove temp -> re-read.
//! Stages run strictly one after another, driven by [`InstallState`].

use crate::commands;
use crate::config::Config;
use crate::reader::read_crontab;
use ctm_adapters::CommandAdapter;
use ctm_core::{
    classify_install, CrontabDocument, FailureKind, InstallEvent, InstallFailure, InstallStage,
    InstallState, TargetIdentity,
};
use tracing::Instrument;

/// Result of a completed install
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub run_id: String,
    /// The host's crontab as read back after installing
    pub reloaded: Option<CrontabDocument>,
    /// Why the read-back failed; the install itself still succeeded
    pub reload_error: Option<FailureKind>,
}

/// Staging file owned by one pipeline run.
///
/// Removed explicitly in `CleaningUp`. If the run is dropped before getting
/// there, removal is spawned onto the runtime instead.
struct TempFile<C: CommandAdapter> {
    adapter: C,
    config: Config,
    path: String,
    elevate: bool,
    armed: bool,
}

impl<C: CommandAdapter> TempFile<C> {
    fn path(&self) -> &str {
        &self.path
    }

    async fn remove(mut self) -> Result<(), FailureKind> {
        self.armed = false;
        let request = commands::remove_file(&self.config, &self.path, self.elevate);
        self.adapter
            .execute(request)
            .await
            .map(|_| ())
            .map_err(|e| classify_install(&e))
    }
}

impl<C: CommandAdapter> Drop for TempFile<C> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(path = %self.path, "install abandoned, removing staging file");
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::error!(path = %self.path, "no runtime to remove staging file");
            return;
        };
        let adapter = self.adapter.clone();
        let request = commands::remove_file(&self.config, &self.path, self.elevate);
        handle.spawn(async move {
            if let Err(e) = adapter.execute(request).await {
                tracing::warn!(error = %e, "staging file removal failed");
            }
        });
    }
}

/// Runs one install against the host
pub struct InstallPipeline<'a, C> {
    adapter: &'a C,
    config: &'a Config,
}

impl<'a, C: CommandAdapter> InstallPipeline<'a, C> {
    pub fn new(adapter: &'a C, config: &'a Config) -> Self {
        Self { adapter, config }
    }

    /// Install `document` as the target's crontab.
    ///
    /// Returns only after the staging file is gone, whatever the outcome.
    pub async fn run(
        &self,
        target: &TargetIdentity,
        document: &CrontabDocument,
    ) -> Result<InstallReport, InstallFailure> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "install",
            run_id = %run_id,
            user = target.effective_user(),
            elevate = target.requires_elevation()
        );

        self.run_inner(run_id.clone(), target, document)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        run_id: String,
        target: &TargetIdentity,
        document: &CrontabDocument,
    ) -> Result<InstallReport, InstallFailure> {
        let elevate = target.requires_elevation();
        let content = document.serialize();
        let start = std::time::Instant::now();

        let mut pending = None;
        let mut state = InstallState::Idle;
        let mut temp: Option<TempFile<C>> = None;
        let mut reloaded = None;
        let mut reload_error = None;

        tracing::info!(lines = document.len(), bytes = content.len(), "starting");

        loop {
            let stage = match state {
                InstallState::Idle => {
                    state = state.transition(InstallEvent::Start, &mut pending);
                    continue;
                }
                InstallState::Done => {
                    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "installed");
                    return Ok(InstallReport {
                        run_id,
                        reloaded,
                        reload_error,
                    });
                }
                InstallState::Failed(failure) => {
                    tracing::error!(
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        stage = %failure.stage,
                        error = %failure.kind,
                        "install failed"
                    );
                    return Err(failure);
                }
                InstallState::Running(stage) => stage,
            };

            let stage_span = tracing::debug_span!("install.stage", stage = %stage);
            let result = async {
                tracing::debug!("entering stage");
                match stage {
                    InstallStage::CreatingTemp => self.create_temp(elevate).await.map(|file| {
                        temp = Some(file);
                    }),
                    InstallStage::Writing => match &temp {
                        Some(file) => self
                            .adapter
                            .write_file(file.path(), content.as_bytes(), elevate)
                            .await
                            .map_err(|e| classify_install(&e)),
                        None => Err(FailureKind::Generic("staging file missing".into())),
                    },
                    InstallStage::Installing => match &temp {
                        Some(file) => self
                            .adapter
                            .execute(commands::install_crontab(self.config, target, file.path()))
                            .await
                            .map(|_| ())
                            .map_err(|e| classify_install(&e)),
                        None => Err(FailureKind::Generic("staging file missing".into())),
                    },
                    InstallStage::CleaningUp => {
                        if let Some(file) = temp.take() {
                            if let Err(kind) = file.remove().await {
                                // Logged only; the stage outcome stands
                                tracing::warn!(error = %kind, "staging file cleanup failed");
                            }
                        }
                        Ok(())
                    }
                    InstallStage::Reloading => {
                        match read_crontab(self.adapter, self.config, target).await {
                            Ok(doc) => {
                                reloaded = Some(doc);
                                Ok(())
                            }
                            Err(kind) => {
                                tracing::warn!(error = %kind, "reload after install failed");
                                reload_error = Some(kind.clone());
                                Err(kind)
                            }
                        }
                    }
                }
            }
            .instrument(stage_span)
            .await;

            let event = match result {
                Ok(()) => InstallEvent::StageSucceeded,
                Err(kind) => InstallEvent::StageFailed(kind),
            };
            state = state.transition(event, &mut pending);
        }
    }

    async fn create_temp(&self, elevate: bool) -> Result<TempFile<C>, FailureKind> {
        let output = self
            .adapter
            .execute(commands::make_temp(self.config, elevate))
            .await
            .map_err(|e| classify_install(&e))?;

        let path = output.stdout.trim();
        if path.is_empty() {
            return Err(FailureKind::Generic(
                "temp file command printed no path".into(),
            ));
        }

        Ok(TempFile {
            adapter: self.adapter.clone(),
            config: self.config.clone(),
            path: path.to_string(),
            elevate,
            armed: true,
        })
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
