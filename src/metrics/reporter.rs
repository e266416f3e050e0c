//! Console reporting: periodic live view plus the final report.

use std::io::{self, Write};

use tokio::time::{interval, Duration};

use super::collector::MetricsCollector;
use super::thresholds::RunVerdict;

/// Prints the live metrics view every `interval_secs` until the reporting
/// task is dropped. Callers must pass a non-zero interval.
pub async fn start_periodic_reporter(collector: MetricsCollector, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    loop {
        ticker.tick().await;
        collector.update_system_metrics();
        print_live_metrics(&collector);
    }
}

pub fn print_live_metrics(collector: &MetricsCollector) {
    let snapshot = collector.snapshot();
    let stats = collector.latency_stats();
    let elapsed = collector.elapsed_seconds();
    let throughput = if elapsed > 0 {
        snapshot.requests.started as f64 / elapsed as f64
    } else {
        0.0
    };

    // Clear screen and move the cursor home.
    print!("\x1B[2J\x1B[1;1H");
    println!("┌────────────────────────────────────────────────────────────┐");
    println!("│               BANCO LOAD TEST - LIVE METRICS               │");
    println!("└────────────────────────────────────────────────────────────┘");
    println!();
    println!("  Elapsed: {}m {:02}s", elapsed / 60, elapsed % 60);
    println!();
    println!(
        "  Requests   started: {:>8}   ok: {:>8}   failed: {:>6}   in-flight: {:>4}",
        snapshot.requests.started,
        snapshot.requests.succeeded,
        snapshot.requests.failed,
        snapshot.requests.in_flight,
    );
    println!(
        "  Rates      {:>8.1} req/s        failure rate: {:>5.2}%",
        throughput,
        snapshot.requests.failure_rate() * 100.0,
    );
    println!(
        "  Latency    p50: {:>5}ms   p95: {:>5}ms   p99: {:>5}ms   max: {:>5}ms",
        stats.p50, stats.p95, stats.p99, stats.max,
    );
    println!();
    println!(
        "  Virtual users ({} total):",
        snapshot.total_active_users()
    );
    for (scenario, count) in &snapshot.active_users {
        println!("    {:<12} {:>5}", scenario, count);
    }
    println!();
    println!(
        "  Checks     {} passed / {} failed   skipped passes: {}",
        snapshot.checks_passed(),
        snapshot.checks_failed(),
        snapshot.skipped,
    );
    println!(
        "  System     CPU: {:>5.1}%   Memory: {}/{} MB",
        snapshot.system.cpu_usage, snapshot.system.memory_used_mb, snapshot.system.memory_total_mb,
    );
    println!();
    println!("  [Press Ctrl+C to stop and drain]");

    // Flush so the in-place view updates immediately.
    let _ = io::stdout().flush();
}

pub fn print_final_report(collector: &MetricsCollector, verdict: &RunVerdict) {
    let snapshot = collector.snapshot();
    let stats = collector.latency_stats();
    let elapsed = collector.elapsed_seconds().max(1);

    println!("\n{}", "═".repeat(64));
    println!("                        FINAL REPORT");
    println!("{}", "═".repeat(64));

    println!("\n📊 REQUESTS");
    println!("   Started:        {}", snapshot.requests.started);
    println!("   Succeeded:      {}", snapshot.requests.succeeded);
    println!("   Failed:         {}", snapshot.requests.failed);
    println!("   Failure rate:   {:.2}%", snapshot.requests.failure_rate() * 100.0);
    println!(
        "   Throughput:     {:.1} req/s over {}s",
        snapshot.requests.started as f64 / elapsed as f64,
        elapsed,
    );

    println!("\n📈 LATENCY (ms, {} samples)", stats.count);
    println!("   Min:    {:>6}", stats.min);
    println!("   Mean:   {:>6.1}", stats.mean);
    println!("   p50:    {:>6}", stats.p50);
    println!("   p95:    {:>6}", stats.p95);
    println!("   p99:    {:>6}", stats.p99);
    println!("   Max:    {:>6}", stats.max);

    println!("\n✅ CHECKS");
    if snapshot.checks.is_empty() {
        println!("   (no checks recorded)");
    }
    for (name, counts) in &snapshot.checks {
        println!(
            "   {:<36} {:>7} passed {:>6} failed {:>7.2}%",
            name,
            counts.passed,
            counts.failed,
            counts.pass_rate() * 100.0,
        );
    }
    if snapshot.skipped > 0 {
        println!(
            "   Skipped passes (operands not ready): {} ({:.1}% of action slots)",
            snapshot.skipped,
            snapshot.skip_rate() * 100.0,
        );
    }

    println!("\n🚦 THRESHOLDS");
    println!(
        "   {} p95 latency: {}ms (limit {}ms)",
        mark(verdict.latency_ok()),
        verdict.p95_ms,
        verdict.max_p95_ms,
    );
    println!(
        "   {} failure rate: {:.2}% (limit {:.2}%)",
        mark(verdict.failures_ok()),
        verdict.failure_rate * 100.0,
        verdict.max_failure_rate * 100.0,
    );

    println!("\n{}", "═".repeat(64));
    if verdict.passed() {
        println!("Result: PASSED");
    } else {
        println!("Result: FAILED");
    }
    println!("{}", "═".repeat(64));
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}
