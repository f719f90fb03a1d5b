// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ctm completions <shell>`

use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Write the completion script for the `C` command line to `out`
    pub fn write<C: CommandFactory>(&self, out: &mut impl Write) {
        let mut cmd = C::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, name, out);
    }
}

#[cfg(test)]
#[path = "completions_tests.rs"]
mod tests;
