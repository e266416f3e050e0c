//! Scenario driver tests: population control, graceful drain, cancellation.
//!
//! These run under paused tokio time with a flow that only sleeps, so a
//! multi-second profile plays out instantly and deterministically.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::watch;

use banco_load::api::{ApiVariant, BankClient};
use banco_load::check::Checker;
use banco_load::context::RunContext;
use banco_load::metrics::MetricsCollector;
use banco_load::registry::IdRegistry;
use banco_load::scheduler::{drive, RampProfile, Scenario, Stage, UserFlow};

#[derive(Default)]
struct PassStats {
    entered: AtomicUsize,
    exited: AtomicUsize,
    concurrent: AtomicUsize,
    max_concurrent: AtomicUsize,
}

/// A flow that sleeps for a fixed pass duration and tracks concurrency.
struct CountingFlow {
    stats: Arc<PassStats>,
    pass_duration: Duration,
}

impl UserFlow for CountingFlow {
    fn run_pass(&self, _cx: Arc<RunContext>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let stats = Arc::clone(&self.stats);
        let pass_duration = self.pass_duration;
        Box::pin(async move {
            stats.entered.fetch_add(1, Ordering::SeqCst);
            let now = stats.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
            stats.max_concurrent.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(pass_duration).await;
            stats.concurrent.fetch_sub(1, Ordering::SeqCst);
            stats.exited.fetch_add(1, Ordering::SeqCst);
        })
    }
}

fn test_context() -> (Arc<RunContext>, MetricsCollector) {
    let collector = MetricsCollector::new();
    // Port 9 is never contacted; the counting flow does no I/O.
    let client = BankClient::new(
        "http://127.0.0.1:9",
        ApiVariant::Classic,
        Duration::from_secs(1),
    )
    .unwrap();
    let checker = Checker::new(collector.clone(), StatusCode::OK);
    let cx = Arc::new(RunContext::new(client, IdRegistry::new(), checker));
    (cx, collector)
}

fn counting_scenario(
    stages: Vec<Stage>,
    think_time: Duration,
    pass_duration: Duration,
) -> (Scenario, Arc<PassStats>) {
    let stats = Arc::new(PassStats::default());
    let scenario = Scenario {
        name: "counting",
        profile: RampProfile::new(0, stages),
        think_time,
        flow: Arc::new(CountingFlow {
            stats: Arc::clone(&stats),
            pass_duration,
        }),
    };
    (scenario, stats)
}

#[tokio::test(start_paused = true)]
async fn test_population_never_exceeds_peak_and_drains() {
    let (cx, collector) = test_context();
    let (scenario, stats) = counting_scenario(
        vec![
            Stage::new(Duration::from_secs(2), 10),
            Stage::new(Duration::from_secs(2), 10),
            Stage::new(Duration::from_secs(2), 0),
        ],
        Duration::from_millis(50),
        Duration::from_millis(30),
    );
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    drive(scenario, cx, cancel_rx).await;

    let entered = stats.entered.load(Ordering::SeqCst);
    let exited = stats.exited.load(Ordering::SeqCst);
    assert!(entered > 0, "virtual users never ran a pass");
    assert_eq!(entered, exited, "a pass was abandoned mid-flight");
    assert!(
        stats.max_concurrent.load(Ordering::SeqCst) <= 10,
        "concurrency exceeded the profile peak"
    );
    assert_eq!(stats.concurrent.load(Ordering::SeqCst), 0);
    assert_eq!(collector.snapshot().active_users["counting"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_ramp_up_holds_population_at_instantaneous_target() {
    let (cx, collector) = test_context();
    let (scenario, _stats) = counting_scenario(
        vec![Stage::new(Duration::from_secs(10), 20)],
        Duration::from_millis(20),
        Duration::from_millis(10),
    );
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    let driver = tokio::spawn(drive(scenario, Arc::clone(&cx), cancel_rx));

    // Sample halfway up the ramp. Allow one tick of measurement slack on
    // top of the linear target.
    tokio::time::sleep(Duration::from_secs(5)).await;
    let halfway = collector.snapshot().active_users["counting"];
    assert!(halfway <= 11, "halfway population {halfway} is above target");
    assert!(halfway >= 8, "halfway population {halfway} lags the ramp");

    driver.await.unwrap();
    assert_eq!(collector.snapshot().active_users["counting"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drains_without_finishing_profile() {
    let (cx, collector) = test_context();
    let (scenario, stats) = counting_scenario(
        vec![
            Stage::new(Duration::from_secs(5), 8),
            Stage::new(Duration::from_secs(600), 8),
        ],
        Duration::from_millis(20),
        Duration::from_millis(40),
    );
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let started = tokio::time::Instant::now();

    let driver = tokio::spawn(drive(scenario, Arc::clone(&cx), cancel_rx));
    tokio::time::sleep(Duration::from_secs(10)).await;
    cancel_tx.send(true).unwrap();
    driver.await.unwrap();

    // Cancellation cut a ten-minute profile short and still drained cleanly.
    assert!(started.elapsed() < Duration::from_secs(60));
    assert_eq!(
        stats.entered.load(Ordering::SeqCst),
        stats.exited.load(Ordering::SeqCst)
    );
    assert_eq!(stats.concurrent.load(Ordering::SeqCst), 0);
    assert_eq!(collector.snapshot().active_users["counting"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_empty_profile_finishes_without_spawning() {
    let (cx, _collector) = test_context();
    let (scenario, stats) = counting_scenario(
        Vec::new(),
        Duration::from_millis(20),
        Duration::from_millis(10),
    );
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    drive(scenario, cx, cancel_rx).await;

    assert_eq!(stats.entered.load(Ordering::SeqCst), 0);
}
