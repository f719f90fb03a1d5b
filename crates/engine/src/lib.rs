// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Crontab session engine

mod commands;
pub mod config;
mod error;
mod install;
mod probe;
mod reader;
mod session;

pub use config::{Config, ConfigError};
pub use error::SessionError;
pub use install::{InstallPipeline, InstallReport};
pub use probe::{probe, Capabilities, ServiceStatus};
pub use reader::read_crontab;
pub use session::{CrontabSession, LoadResult};
