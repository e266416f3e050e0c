//! Pass/fail gating for a completed run.

use super::collector::MetricsCollector;

/// Acceptance limits applied after the run drains. Both bounds are
/// exclusive: reaching a limit fails the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// The 95th-percentile request latency must stay below this, in
    /// milliseconds.
    pub max_p95_ms: u64,
    /// The request failure rate must stay below this fraction.
    pub max_failure_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_p95_ms: 2000,
            max_failure_rate: 0.1,
        }
    }
}

impl Thresholds {
    pub fn evaluate(&self, collector: &MetricsCollector) -> RunVerdict {
        let snapshot = collector.snapshot();
        let stats = collector.latency_stats();
        RunVerdict {
            p95_ms: stats.p95,
            max_p95_ms: self.max_p95_ms,
            failure_rate: snapshot.requests.failure_rate(),
            max_failure_rate: self.max_failure_rate,
        }
    }
}

/// The observed values next to their limits, plus the overall outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunVerdict {
    pub p95_ms: u64,
    pub max_p95_ms: u64,
    pub failure_rate: f64,
    pub max_failure_rate: f64,
}

impl RunVerdict {
    pub fn latency_ok(&self) -> bool {
        self.p95_ms < self.max_p95_ms
    }

    pub fn failures_ok(&self) -> bool {
        self.failure_rate < self.max_failure_rate
    }

    pub fn passed(&self) -> bool {
        self.latency_ok() && self.failures_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector_with(latencies_ms: &[u64], failures: usize) -> MetricsCollector {
        let collector = MetricsCollector::new();
        for latency in latencies_ms {
            collector.request_started();
            collector.request_succeeded(*latency);
        }
        for _ in 0..failures {
            collector.request_started();
            collector.request_failed(1);
        }
        collector
    }

    #[test]
    fn test_quiet_run_passes() {
        let collector = collector_with(&[10, 20, 30], 0);
        let verdict = Thresholds::default().evaluate(&collector);
        assert!(verdict.latency_ok());
        assert!(verdict.failures_ok());
        assert!(verdict.passed());
    }

    #[test]
    fn test_slow_p95_fails_the_run() {
        let latencies: Vec<u64> = std::iter::repeat(5000).take(20).collect();
        let collector = collector_with(&latencies, 0);
        let verdict = Thresholds {
            max_p95_ms: 2000,
            max_failure_rate: 0.1,
        }
        .evaluate(&collector);
        assert!(!verdict.latency_ok());
        assert!(verdict.failures_ok());
        assert!(!verdict.passed());
    }

    #[test]
    fn test_failure_rate_above_limit_fails_the_run() {
        // 3 failures out of 10 finished requests.
        let collector = collector_with(&[10, 10, 10, 10, 10, 10, 10], 3);
        let verdict = Thresholds {
            max_p95_ms: 2000,
            max_failure_rate: 0.1,
        }
        .evaluate(&collector);
        assert!(verdict.latency_ok());
        assert!(!verdict.failures_ok());
        assert!(!verdict.passed());
    }

    #[test]
    fn test_empty_run_passes_by_default() {
        let collector = MetricsCollector::new();
        let verdict = Thresholds::default().evaluate(&collector);
        assert_eq!(verdict.p95_ms, 0);
        assert_eq!(verdict.failure_rate, 0.0);
        assert!(verdict.passed());
    }

    #[test]
    fn test_limits_are_exclusive() {
        // 1 failure out of 10 finished requests reaches the 0.1 limit.
        let collector = collector_with(&[10, 10, 10, 10, 10, 10, 10, 10, 10], 1);
        let verdict = Thresholds {
            max_p95_ms: 2000,
            max_failure_rate: 0.1,
        }
        .evaluate(&collector);
        assert!(!verdict.failures_ok());

        let just_under = collector_with(&[10; 19], 1);
        assert!(Thresholds {
            max_p95_ms: 2000,
            max_failure_rate: 0.1,
        }
        .evaluate(&just_under)
        .failures_ok());
    }
}
