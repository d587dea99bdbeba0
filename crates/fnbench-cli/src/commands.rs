// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 14 October 2026

/*!
Subcommands of the `fnbench` binary.
*/

use anyhow::Result;
use clap::Parser;

mod bench;
mod call;
mod client;
mod describe;
mod serve;

/// The command to run.
#[derive(Parser, Debug)]
pub(crate) enum Command {
    Serve(serve::Args),
    Call(call::Args),
    Bench(bench::Args),
    Describe(describe::Args),
}

pub(crate) fn run(command: Command) -> Result<()> {
    match command {
        Command::Serve(config) => serve::serve(config),
        Command::Call(config) => call::call(config),
        Command::Bench(config) => bench::run(config),
        Command::Describe(config) => describe::describe(config),
    }
}
