use anyhow::{bail, Result};
use fnbench_core::{Call, InputCatalog, ReplyFormat, Workload};
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

pub(crate) const DEFAULT_INPUTS: &[&str] = &["tick"];

/// Sleeps for a fixed time. Used to measure what the harness itself costs.
pub struct SleepWorkload {
    catalog: InputCatalog,
    delay: Duration,
    fail_every: Option<usize>,
    calls: AtomicUsize,
}

impl SleepWorkload {
    pub fn new(inputs: Vec<String>, delay: Duration, fail_every: Option<usize>) -> Result<Self> {
        if fail_every == Some(0) {
            bail!("fail_every must be at least 1");
        }

        Ok(Self {
            catalog: InputCatalog::new(inputs)?,
            delay,
            fail_every,
            calls: AtomicUsize::new(0),
        })
    }
}

impl Workload for SleepWorkload {
    fn identity(&self) -> &str {
        "Sleep"
    }

    fn catalog(&self) -> &InputCatalog {
        &self.catalog
    }

    fn reply_format(&self) -> ReplyFormat {
        ReplyFormat::new("input", "slept")
    }

    fn invoke(&self, _call: &Call<'_>) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::AcqRel) + 1;
        std::thread::sleep(self.delay);

        if let Some(every) = self.fail_every {
            if call % every == 0 {
                bail!("injected failure on call {}", call);
            }
        }

        Ok(format!("{:?}", self.delay))
    }
}

#[cfg(test)]
mod tests {
    use super::SleepWorkload;
    use fnbench_core::{Call, Workload};
    use std::time::Duration;

    #[test]
    fn fails_every_nth_call() {
        let workload =
            SleepWorkload::new(vec!["tick".to_owned()], Duration::ZERO, Some(3)).unwrap();
        let call = Call {
            input: "tick",
            name: None,
        };

        let outcomes = (0..6)
            .map(|_| workload.invoke(&call).is_ok())
            .collect::<Vec<_>>();
        assert_eq!(outcomes, vec![true, true, false, true, true, false]);
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(SleepWorkload::new(vec!["tick".to_owned()], Duration::ZERO, Some(0)).is_err());
    }
}
