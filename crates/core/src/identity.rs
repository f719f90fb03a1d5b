// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target account selection and elevation policy

use serde::{Deserialize, Serialize};

/// Whose crontab an operation targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetIdentity {
    /// Account the caller is running as
    pub current_user: String,
    /// Account picked by the operator, if any
    pub selected_user: Option<String>,
}

impl TargetIdentity {
    /// Target the caller's own crontab
    pub fn own(current_user: impl Into<String>) -> Self {
        Self {
            current_user: current_user.into(),
            selected_user: None,
        }
    }

    pub fn with_selected(self, selected_user: impl Into<String>) -> Self {
        Self {
            selected_user: Some(selected_user.into()),
            ..self
        }
    }

    /// Account whose crontab is read and written
    pub fn effective_user(&self) -> &str {
        self.selected_user.as_deref().unwrap_or(&self.current_user)
    }

    /// Account to pass to `crontab -u`, or `None` for the caller's own table
    pub fn foreign_user(&self) -> Option<&str> {
        match self.selected_user.as_deref() {
            Some(user) if user != self.current_user => Some(user),
            _ => None,
        }
    }

    /// Whether commands for this target must run elevated.
    ///
    /// Any cross-account operation counts as privileged, whether or not the
    /// host would actually refuse it unelevated.
    pub fn requires_elevation(&self) -> bool {
        self.foreign_user().is_some()
    }
}
