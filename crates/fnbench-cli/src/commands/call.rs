// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 14 October 2026

use super::client::Client;
use anyhow::{bail, Result};
use clap::Parser;

/// Invoke a served function and print its replies.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// Address of the server.
    #[clap(short, long, default_value = "127.0.0.1:50051")]
    addr: String,

    /// Optional tag, like `record` or `replay`.
    #[clap(short, long)]
    name: Option<String>,

    /// How many sequential calls to make.
    #[clap(short, long, default_value = "1")]
    count: usize,
}

pub(super) fn call(config: Args) -> Result<()> {
    let client = Client::new(&config.addr);

    let mut failed = 0;
    for _ in 0..config.count {
        match client.invoke(config.name.as_deref())? {
            Ok(message) => println!("{}", message),
            Err(status) => {
                eprintln!("{}", status);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} calls failed", failed, config.count);
    }
    Ok(())
}
