// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 8 October 2026

use std::time::Duration;

/// Running latency statistics for one function.
///
/// Uses Welford's online algorithm so mean and variance are integrated
/// without keeping individual samples. Failed calls are only counted.
#[derive(Clone, Debug, Default)]
pub struct LatencyStats {
    state: WelfordState,
    failed: usize,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.state.update(elapsed);
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn report(&self) -> ServeReport {
        ServeReport {
            served: self.state.count,
            failed: self.failed,
            mean: self.state.mean(),
            stddev: self.state.stddev(),
        }
    }
}

/// Snapshot of [`LatencyStats`], logged when a server shuts down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ServeReport {
    /// Successful invocations.
    pub served: usize,
    pub failed: usize,
    pub mean: Duration,
    pub stddev: Duration,
}

impl std::fmt::Display for ServeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} served, {} failed, {:.3} ms ± {:.3}",
            self.served,
            self.failed,
            self.mean.as_secs_f64() * 1000.0,
            self.stddev.as_secs_f64() * 1000.0,
        )
    }
}

#[derive(Clone, Debug, Default)]
struct WelfordState {
    mean: f64,
    mean2: f64,

    count: usize,
}

impl WelfordState {
    fn update(&mut self, value: Duration) {
        let value = value.as_secs_f64() * 1000.0;

        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / (self.count as f64);

        let delta2 = value - self.mean;
        self.mean2 += delta * delta2;
    }

    fn mean(&self) -> Duration {
        Duration::from_secs_f64(self.mean.max(0.0) / 1000.0)
    }

    fn stddev(&self) -> Duration {
        if self.count < 2 {
            return Duration::ZERO;
        }

        let variance = self.mean2 / (self.count - 1) as f64;
        Duration::from_secs_f64(variance.max(0.0).sqrt() / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{LatencyStats, WelfordState};
    use std::time::Duration;

    fn is_close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1.0e-6
    }

    #[test]
    fn empty_report() {
        let report = LatencyStats::new().report();
        assert_eq!(report.served, 0);
        assert_eq!(report.mean, Duration::ZERO);
        assert_eq!(report.stddev, Duration::ZERO);
    }

    #[test]
    fn mean_no_diverge() {
        let mut state = WelfordState::default();

        for _ in 0..10 {
            state.update(Duration::from_secs(1));
        }

        assert!(is_close(state.mean().as_secs_f64(), 1.0));
        assert!(is_close(state.stddev().as_secs_f64(), 0.0));
    }

    #[test]
    fn mean_converge() {
        let mut state = WelfordState::default();

        for v in 0..10 {
            state.update(Duration::from_secs(v));
        }

        assert!(is_close(state.mean().as_secs_f64(), 4.5));
    }

    #[test]
    fn sample_stddev() {
        let mut state = WelfordState::default();

        for v in [2, 4, 4, 4, 5, 5, 7, 9] {
            state.update(Duration::from_secs(v));
        }

        // sample variance of the set is 32 / 7
        assert!(is_close(
            state.stddev().as_secs_f64(),
            (32.0_f64 / 7.0).sqrt()
        ));
    }

    #[test]
    fn failures_are_counted_separately() {
        let mut stats = LatencyStats::new();
        stats.record(Duration::from_millis(10));
        stats.record_failure();
        stats.record_failure();

        let report = stats.report();
        assert_eq!(report.served, 1);
        assert_eq!(report.failed, 2);
        assert!(is_close(report.mean.as_secs_f64(), 0.010));
    }
}
