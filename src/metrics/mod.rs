// Metrics module
// Thread-safe collection, console reporting, and threshold gating

pub mod collector;
pub mod reporter;
pub mod thresholds;
pub mod types;

pub use collector::MetricsCollector;
pub use thresholds::{RunVerdict, Thresholds};
pub use types::{CheckCounts, LatencyStats, RequestMetrics, RunMetrics, SystemMetrics};
