// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 7 October 2026

use crate::{
    error::InvocationError, selector::Selector, timing::LatencyStats, Call, ServeReport, Workload,
};
use parking_lot::Mutex;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// The result of a timed computation together with its elapsed time.
#[derive(Debug)]
pub struct Timed<T> {
    pub latency: Duration,
    pub result: anyhow::Result<T>,
}

/// Run `f`, timing exactly the call and nothing around it. Failures are
/// returned untouched alongside the time spent before they occurred.
pub fn timed<T>(f: impl FnOnce() -> anyhow::Result<T>) -> Timed<T> {
    let start = Instant::now();
    let result = f();
    let latency = start.elapsed();

    Timed { latency, result }
}

/// Whether an invocation has a time budget.
///
/// The harness never cancels a running computation. With
/// [`ExecutionLimit::Report`] a call that finishes after the limit is
/// turned into [`InvocationError::DeadlineExceeded`] once it returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionLimit {
    #[default]
    Unbounded,
    Report(Duration),
}

/// One completed invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub input: String,
    pub summary: String,
    pub latency: Duration,
}

/// Runs invocations of one workload: select, time, record.
pub struct Executor {
    workload: Arc<dyn Workload>,
    selector: Selector,
    limit: ExecutionLimit,
    stats: Mutex<LatencyStats>,
}

impl Executor {
    pub fn new(workload: Arc<dyn Workload>) -> Self {
        let selector = Selector::new(workload.catalog().clone());
        Self {
            workload,
            selector,
            limit: ExecutionLimit::default(),
            stats: Mutex::new(LatencyStats::new()),
        }
    }

    pub fn with_limit(mut self, limit: ExecutionLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn identity(&self) -> &str {
        self.workload.identity()
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn limit(&self) -> ExecutionLimit {
        self.limit
    }

    /// Run one invocation. `name` is the optional request parameter; an
    /// empty string is treated as absent.
    pub fn invoke(&self, name: Option<&str>) -> Result<Invocation, InvocationError> {
        let name = name.filter(|n| !n.is_empty());
        let selection = self.selector.select(name);
        let call = Call {
            input: selection.input,
            name,
        };

        log::debug!(
            "{}: invoking on {} (slot {:?})",
            self.identity(),
            call.input,
            selection.slot
        );

        let Timed { latency, result } = timed(|| self.workload.invoke(&call));

        let outcome = match (result, self.limit) {
            (Err(source), _) => Err(InvocationError::Failed {
                function: self.identity().to_owned(),
                input: call.input.to_owned(),
                latency,
                source,
            }),
            (Ok(_), ExecutionLimit::Report(limit)) if latency > limit => {
                Err(InvocationError::DeadlineExceeded {
                    function: self.identity().to_owned(),
                    input: call.input.to_owned(),
                    latency,
                    limit,
                })
            }
            (Ok(summary), _) => Ok(Invocation {
                function: self.identity().to_owned(),
                input: call.input.to_owned(),
                summary,
                latency,
            }),
        };

        let mut stats = self.stats.lock();
        match &outcome {
            Ok(invocation) => stats.record(invocation.latency),
            Err(_) => stats.record_failure(),
        }

        outcome
    }

    /// Render an invocation with this workload's reply format.
    pub fn reply(&self, invocation: &Invocation) -> String {
        self.workload.reply_format().format(invocation)
    }

    pub fn report(&self) -> ServeReport {
        self.stats.lock().report()
    }
}

#[cfg(test)]
mod tests {
    use super::{timed, ExecutionLimit, Executor};
    use crate::{Call, InputCatalog, InvocationError, Workload};
    use std::{sync::Arc, time::Duration};

    struct Fixed {
        catalog: InputCatalog,
        delay: Duration,
    }

    impl Workload for Fixed {
        fn identity(&self) -> &str {
            "fixed"
        }

        fn catalog(&self) -> &InputCatalog {
            &self.catalog
        }

        fn invoke(&self, call: &Call<'_>) -> anyhow::Result<String> {
            std::thread::sleep(self.delay);
            Ok(format!("{}:{}", call.input, call.name.unwrap_or("-")))
        }
    }

    fn executor(delay: Duration) -> Executor {
        Executor::new(Arc::new(Fixed {
            catalog: InputCatalog::new(["a", "b"]).unwrap(),
            delay,
        }))
    }

    #[test]
    fn timed_keeps_failure() {
        let res = timed::<()>(|| {
            std::thread::sleep(Duration::from_millis(5));
            anyhow::bail!("boom")
        });

        assert!(res.latency >= Duration::from_millis(5));
        assert_eq!(res.result.unwrap_err().to_string(), "boom");
    }

    #[test]
    fn empty_name_is_absent() {
        let executor = executor(Duration::ZERO);
        let inv = executor.invoke(Some("")).unwrap();
        assert_eq!(inv.summary, "a:-");

        let inv = executor.invoke(Some("x")).unwrap();
        assert_eq!(inv.summary, "b:x");
    }

    #[test]
    fn deadline_is_reported_not_enforced() {
        let executor = executor(Duration::from_millis(20))
            .with_limit(ExecutionLimit::Report(Duration::from_millis(1)));

        let err = executor.invoke(None).unwrap_err();
        match err {
            InvocationError::DeadlineExceeded { latency, limit, .. } => {
                assert!(latency >= Duration::from_millis(20));
                assert_eq!(limit, Duration::from_millis(1));
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert_eq!(executor.selector().position(), 1);
        assert_eq!(executor.report().failed, 1);
    }

    #[test]
    fn unbounded_by_default() {
        let executor = executor(Duration::from_millis(2));
        assert_eq!(executor.limit(), ExecutionLimit::Unbounded);
        assert!(executor.invoke(None).is_ok());
        assert_eq!(executor.report().served, 1);
    }
}
