// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 9 October 2026

use fnbench_core::ConfigError;
use std::net::SocketAddr;
use thiserror::Error;

/// Reasons a server never starts serving. All of them are fatal.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed loading the workload resource: {0:#}")]
    ResourceLoad(anyhow::Error),

    #[error("failed binding {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("failed spawning worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
