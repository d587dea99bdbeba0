// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 6 October 2026

use std::time::Duration;
use thiserror::Error;

/// Problems with the static setup of a function. All of these are detected
/// before a server starts accepting calls.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("the input catalog is empty")]
    EmptyCatalog,

    #[error("tag {0:?} is bound more than once")]
    DuplicateTag(String),

    #[error("the worker pool needs at least one thread")]
    ZeroWorkers,

    #[error("invalid listening address {0:?}")]
    InvalidAddress(String),
}

/// A single invocation failed. The server keeps running.
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("{function} failed on {input} after {latency:?}: {source:#}")]
    Failed {
        function: String,
        input: String,
        latency: Duration,
        source: anyhow::Error,
    },

    #[error("{function} took {latency:?} on {input}, over the {limit:?} limit")]
    DeadlineExceeded {
        function: String,
        input: String,
        latency: Duration,
        limit: Duration,
    },
}

impl InvocationError {
    /// Time spent in the computation before it failed or finished late.
    pub fn latency(&self) -> Duration {
        match self {
            InvocationError::Failed { latency, .. } => *latency,
            InvocationError::DeadlineExceeded { latency, .. } => *latency,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            InvocationError::Failed { input, .. } => input,
            InvocationError::DeadlineExceeded { input, .. } => input,
        }
    }
}
