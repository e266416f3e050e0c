//! Metric snapshot types shared by the collector and the console reporter.

use std::collections::BTreeMap;

/// Request-level counters. `failed` covers transport errors and responses
/// with an unexpected status; `in_flight` is the gap between started and
/// finished requests.
#[derive(Debug, Clone, Default)]
pub struct RequestMetrics {
    pub started: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub in_flight: usize,
}

impl RequestMetrics {
    pub fn finished(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Fraction of finished requests that failed, in `0.0..=1.0`.
    pub fn failure_rate(&self) -> f64 {
        let finished = self.finished();
        if finished == 0 {
            0.0
        } else {
            self.failed as f64 / finished as f64
        }
    }
}

/// Pass/fail tally for one named check.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckCounts {
    pub passed: usize,
    pub failed: usize,
}

impl CheckCounts {
    /// Fraction of recorded results that passed, in `0.0..=1.0`.
    pub fn pass_rate(&self) -> f64 {
        let total = self.passed + self.failed;
        if total == 0 {
            0.0
        } else {
            self.passed as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    pub cpu_usage: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
}

/// Full point-in-time view of a run. Check names and scenario names are
/// compile-time constants, so the maps key on `&'static str` and stay
/// cheap to clone for snapshots.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    pub requests: RequestMetrics,
    pub checks: BTreeMap<&'static str, CheckCounts>,
    /// Scenario passes that sent nothing because a required operand was
    /// not registered yet. Excluded from the failure rate.
    pub skipped: usize,
    pub active_users: BTreeMap<&'static str, usize>,
    pub system: SystemMetrics,
}

impl RunMetrics {
    pub fn checks_passed(&self) -> usize {
        self.checks.values().map(|c| c.passed).sum()
    }

    pub fn checks_failed(&self) -> usize {
        self.checks.values().map(|c| c.failed).sum()
    }

    pub fn total_active_users(&self) -> usize {
        self.active_users.values().sum()
    }

    /// Share of action slots that were skipped instead of sent.
    pub fn skip_rate(&self) -> f64 {
        let slots = self.requests.started + self.skipped;
        if slots == 0 {
            0.0
        } else {
            self.skipped as f64 / slots as f64
        }
    }
}

/// Summary of the latency histogram, all values in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct LatencyStats {
    pub min: u64,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub max: u64,
    pub mean: f64,
    pub count: u64,
}
