//! Run orchestration: builds the shared context, drives every scenario
//! concurrently, then reports and applies the thresholds.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use reqwest::StatusCode;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::api::{ApiVariant, BankClient};
use crate::check::Checker;
use crate::cli::RunArgs;
use crate::config;
use crate::context::RunContext;
use crate::metrics::{reporter, MetricsCollector, Thresholds};
use crate::registry::{EntityKind, IdRegistry};
use crate::scheduler;

/// Executes a full load-test run. Returns `true` when all thresholds held.
pub async fn execute(args: RunArgs) -> Result<bool> {
    let variant: ApiVariant = args.api_variant.parse().map_err(anyhow::Error::msg)?;
    let expect = match args.expect_status {
        Some(code) => StatusCode::from_u16(code)
            .with_context(|| format!("invalid --expect-status {code}"))?,
        None => variant.success_status(),
    };

    let client = BankClient::new(
        &args.base_url,
        variant,
        Duration::from_secs(args.request_timeout),
    )?;
    let collector = MetricsCollector::new();
    let checker = Checker::new(collector.clone(), expect);
    let cx = Arc::new(RunContext::new(client, IdRegistry::new(), checker));

    let scenarios =
        config::get_load_profile(&args.profile, Duration::from_millis(args.think_time_ms));
    let scenarios = config::filter_scenarios(scenarios, &args.scenario);
    let scenario_names: Vec<&str> = scenarios.iter().map(|s| s.name).collect();

    info!("Banco load test starting");
    info!("  Base URL:    {}", args.base_url);
    info!(
        "  API variant: {} (expecting {})",
        variant.as_str(),
        expect.as_u16()
    );
    info!("  Profile:     {}", args.profile);
    info!("  Scenarios:   {}", scenario_names.join(", "));
    info!("  Think time:  {}ms", args.think_time_ms);
    info!(
        "  Thresholds:  p95 < {}ms, failure rate < {:.0}%",
        args.max_p95_ms,
        args.max_failure_rate * 100.0
    );

    let reporter_task = (args.report_interval > 0).then(|| {
        tokio::spawn(reporter::start_periodic_reporter(
            collector.clone(),
            args.report_interval,
        ))
    });

    // Ctrl+C flips the cancel channel; drivers jump to their drain. The
    // task owns the sender, so it must outlive the drivers either way.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupt received, draining in-flight work");
                let _ = cancel_tx.send(true);
            }
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    });

    let mut driver_tasks = Vec::new();
    for scenario in scenarios {
        let cx = Arc::clone(&cx);
        let cancel_rx = cancel_rx.clone();
        driver_tasks.push(tokio::spawn(scheduler::drive(scenario, cx, cancel_rx)));
    }
    for task in driver_tasks {
        if let Err(e) = task.await {
            error!(error = %e, "scenario driver panicked");
        }
    }

    if let Some(task) = reporter_task {
        task.abort();
    }

    info!(
        accounts = cx.ids.len(EntityKind::Account),
        pix_keys = cx.ids.len(EntityKind::PixKey),
        cards = cx.ids.len(EntityKind::Card),
        "entities registered during the run"
    );

    collector.update_system_metrics();
    let thresholds = Thresholds {
        max_p95_ms: args.max_p95_ms,
        max_failure_rate: args.max_failure_rate,
    };
    let verdict = thresholds.evaluate(&collector);
    reporter::print_final_report(&collector, &verdict);

    Ok(verdict.passed())
}
