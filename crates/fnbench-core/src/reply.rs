// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 7 October 2026

use crate::Invocation;

/// Labels used when rendering an [`Invocation`] into the reply line.
///
/// The rendered line looks like
/// `fn: Model Serving CNN | input: image.jpg, pred: tabby, lat: 0.012345 | runtime: rust`
/// with the latency in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplyFormat {
    input_label: &'static str,
    summary_label: &'static str,
}

impl Default for ReplyFormat {
    fn default() -> Self {
        Self::new("input", "result")
    }
}

impl ReplyFormat {
    pub const fn new(input_label: &'static str, summary_label: &'static str) -> Self {
        Self {
            input_label,
            summary_label,
        }
    }

    pub fn format(&self, invocation: &Invocation) -> String {
        format!(
            "fn: {} | {}: {}, {}: {}, lat: {:.6} | runtime: rust",
            single_line(&invocation.function),
            self.input_label,
            single_line(&invocation.input),
            self.summary_label,
            single_line(&invocation.summary),
            invocation.latency.as_secs_f64(),
        )
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
