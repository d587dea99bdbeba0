// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 6 October 2026

use crate::{InputCatalog, ReplyFormat};

/// What the computation is asked to do for one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Call<'a> {
    /// The input chosen by the selector.
    pub input: &'a str,
    /// The optional name carried by the request, already stripped of the
    /// empty string.
    pub name: Option<&'a str>,
}

/// A function body together with the state it was initialized with.
///
/// Implementations are created once, before the server binds, and are then
/// shared read-only between all workers. If the computation cannot run on
/// several threads at once the implementation has to serialize internally.
pub trait Workload: Send + Sync {
    /// The function name reported in every reply.
    fn identity(&self) -> &str;

    /// The inputs this function rotates through.
    fn catalog(&self) -> &InputCatalog;

    /// How replies of this function are labelled.
    fn reply_format(&self) -> ReplyFormat {
        ReplyFormat::default()
    }

    /// Run the opaque computation and return a short textual summary of
    /// the result: a label, a path.
    fn invoke(&self, call: &Call<'_>) -> anyhow::Result<String>;
}
