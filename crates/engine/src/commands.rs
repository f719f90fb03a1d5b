// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument vectors for host commands
//!
//! All requests are built here from fixed executables. The only
//! caller-influenced arguments are the target account name and paths the
//! host itself produced.

use crate::config::Config;
use ctm_core::{CommandRequest, TargetIdentity};

fn with_arg(base: &[String], arg: &str) -> Vec<String> {
    let mut argv = base.to_vec();
    argv.push(arg.to_string());
    argv
}

fn crontab_argv(config: &Config, target: &TargetIdentity) -> Vec<String> {
    let mut argv = vec![config.crontab_bin.clone()];
    if let Some(user) = target.foreign_user() {
        argv.push("-u".to_string());
        argv.push(user.to_string());
    }
    argv
}

/// `crontab [-u user] -l`
pub fn read_crontab(config: &Config, target: &TargetIdentity) -> CommandRequest {
    let mut argv = crontab_argv(config, target);
    argv.push("-l".to_string());
    CommandRequest::new(argv).elevated(target.requires_elevation())
}

/// `crontab [-u user] <path>`
pub fn install_crontab(config: &Config, target: &TargetIdentity, path: &str) -> CommandRequest {
    let mut argv = crontab_argv(config, target);
    argv.push(path.to_string());
    CommandRequest::new(argv).elevated(target.requires_elevation())
}

pub fn make_temp(config: &Config, elevate: bool) -> CommandRequest {
    CommandRequest::new(config.temp_command.clone()).elevated(elevate)
}

pub fn remove_file(config: &Config, path: &str, elevate: bool) -> CommandRequest {
    CommandRequest::new(with_arg(&config.remove_command, path)).elevated(elevate)
}

/// `which <crontab>`
pub fn locate_crontab(config: &Config) -> CommandRequest {
    CommandRequest::new(["which", config.crontab_bin.as_str()])
}

/// `systemctl is-active <service>`
pub fn service_active(service: &str) -> CommandRequest {
    CommandRequest::new(["systemctl", "is-active", service])
}
