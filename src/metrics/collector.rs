//! Thread-safe metrics collection.

use std::sync::Arc;
use std::time::Instant;

use hdrhistogram::Histogram;
use parking_lot::RwLock;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use super::types::{LatencyStats, RunMetrics, SystemMetrics};

/// Central metrics sink, cloned into every virtual user and the reporter.
/// Counters live behind one lock; latencies go into an HDR histogram with
/// three significant digits.
#[derive(Clone)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<RunMetrics>>,
    latencies: Arc<RwLock<Histogram<u64>>>,
    system: Arc<RwLock<System>>,
    start_time: Instant,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(RunMetrics::default())),
            latencies: Arc::new(RwLock::new(
                Histogram::new(3).expect("Failed to create latency histogram"),
            )),
            system: Arc::new(RwLock::new(System::new_with_specifics(
                RefreshKind::new()
                    .with_cpu(CpuRefreshKind::everything())
                    .with_memory(MemoryRefreshKind::everything()),
            ))),
            start_time: Instant::now(),
        }
    }

    pub fn request_started(&self) {
        let mut m = self.metrics.write();
        m.requests.started += 1;
        m.requests.in_flight += 1;
    }

    pub fn request_succeeded(&self, latency_ms: u64) {
        {
            let mut m = self.metrics.write();
            m.requests.succeeded += 1;
            m.requests.in_flight = m.requests.in_flight.saturating_sub(1);
        }
        self.record_latency(latency_ms);
    }

    pub fn request_failed(&self, latency_ms: u64) {
        {
            let mut m = self.metrics.write();
            m.requests.failed += 1;
            m.requests.in_flight = m.requests.in_flight.saturating_sub(1);
        }
        self.record_latency(latency_ms);
    }

    pub fn check_passed(&self, name: &'static str) {
        self.metrics.write().checks.entry(name).or_default().passed += 1;
    }

    pub fn check_failed(&self, name: &'static str) {
        self.metrics.write().checks.entry(name).or_default().failed += 1;
    }

    /// Records a pass that sent nothing because its operand was missing.
    pub fn pass_skipped(&self) {
        self.metrics.write().skipped += 1;
    }

    /// Gauge of live virtual users, set by each scenario driver on its tick.
    pub fn set_active_users(&self, scenario: &'static str, count: usize) {
        self.metrics.write().active_users.insert(scenario, count);
    }

    fn record_latency(&self, latency_ms: u64) {
        // Skip the sample under contention rather than stall a virtual user.
        if let Some(mut hist) = self.latencies.try_write() {
            let _ = hist.record(latency_ms);
        }
    }

    pub fn update_system_metrics(&self) {
        let mut system = self.system.write();
        system.refresh_cpu_all();
        system.refresh_memory();
        let mut m = self.metrics.write();
        m.system = SystemMetrics {
            cpu_usage: system.global_cpu_usage(),
            memory_used_mb: system.used_memory() / 1024 / 1024,
            memory_total_mb: system.total_memory() / 1024 / 1024,
        };
    }

    pub fn snapshot(&self) -> RunMetrics {
        self.metrics.read().clone()
    }

    pub fn latency_stats(&self) -> LatencyStats {
        let hist = self.latencies.read();
        LatencyStats {
            min: hist.min(),
            p50: hist.value_at_quantile(0.50),
            p95: hist.value_at_quantile(0.95),
            p99: hist.value_at_quantile(0.99),
            max: hist.max(),
            mean: hist.mean(),
            count: hist.len(),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
