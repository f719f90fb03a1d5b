// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Who is running ctm.
//!
//! The account comes from the host (`id -un`). `$USER` is only consulted
//! when that lookup fails.

use crate::error::CtmError;
use ctm_adapters::CommandAdapter;
use ctm_core::CommandRequest;

/// Name of the account running ctm
pub async fn current_user<C: CommandAdapter>(
    adapter: &C,
    env_user: Option<String>,
) -> Result<String, CtmError> {
    let lookup = adapter.execute(CommandRequest::new(["id", "-un"])).await;
    let env_user = env_user.filter(|user| !user.trim().is_empty());

    match lookup {
        Ok(output) if !output.stdout.trim().is_empty() => Ok(output.stdout.trim().to_string()),
        Ok(_) => env_user.ok_or_else(|| {
            CtmError::new("Could not determine the current user")
                .with_context("id -un printed nothing and $USER is not set")
        }),
        Err(err) => match env_user {
            Some(user) => {
                tracing::warn!(error = %err, user = %user, "id -un failed, using $USER");
                Ok(user)
            }
            None => Err(CtmError::new("Could not determine the current user")
                .with_context(err.to_string())),
        },
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
