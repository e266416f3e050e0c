//! Scenario driver: holds the live virtual-user population on the ramp
//! profile's target.
//!
//! The driver ticks every 100ms, recomputes the instantaneous target, and
//! spawns or retires users to match. Retirement is graceful: a stop signal
//! flips a watch channel, the user finishes its in-flight pass, and the
//! driver awaits the task. Think-time sleeps are interruptible; a pass that
//! has already started never is.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::{debug, error, info};

use super::ramp::{Phase, RampProfile};
use crate::context::RunContext;

const TICK: Duration = Duration::from_millis(100);

/// One full pass of a scenario, executed repeatedly by each virtual user.
/// Failures are recorded through the context's checker, never returned.
pub trait UserFlow: Send + Sync {
    fn run_pass(&self, cx: Arc<RunContext>) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// A named workload: its ramp profile, per-user think time, and the flow
/// every virtual user runs.
pub struct Scenario {
    pub name: &'static str,
    pub profile: RampProfile,
    pub think_time: Duration,
    pub flow: Arc<dyn UserFlow>,
}

struct UserHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl UserHandle {
    fn signal_stop(&self) {
        let _ = self.stop.send(true);
    }
}

/// Runs one scenario to completion: ramps the population along the profile,
/// then drains every remaining user. Returns once the last pass finishes.
/// `cancel` flips when the whole run is being stopped early; the scenario
/// then jumps straight to the drain.
pub async fn drive(scenario: Scenario, cx: Arc<RunContext>, mut cancel: watch::Receiver<bool>) {
    let total = scenario.profile.total_duration();
    info!(
        scenario = scenario.name,
        duration_secs = total.as_secs(),
        peak_users = scenario.profile.peak_target(),
        "starting scenario"
    );

    let start = Instant::now();
    let mut ticker = interval(TICK);
    let mut users: Vec<UserHandle> = Vec::new();
    let mut retired: Vec<JoinHandle<()>> = Vec::new();
    let mut spawned_total: usize = 0;
    let mut phase = Phase::Pending;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.changed() => {
                info!(scenario = scenario.name, "run cancelled, draining");
                break;
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= total {
            break;
        }

        let next_phase = scenario.profile.phase_at(elapsed);
        if next_phase != phase {
            info!(scenario = scenario.name, ?phase, ?next_phase, "phase change");
            phase = next_phase;
        }

        let desired = scenario.profile.target_at(elapsed);
        while users.len() < desired {
            users.push(spawn_user(&scenario, cx.clone()));
            spawned_total += 1;
        }
        while users.len() > desired {
            if let Some(user) = users.pop() {
                user.signal_stop();
                retired.push(user.task);
            }
        }
        cx.checks
            .collector()
            .set_active_users(scenario.name, users.len());
    }

    // Profile over (or run cancelled): retire everyone still looping and
    // wait for in-flight passes to finish.
    let remaining = users.len();
    for user in users {
        user.signal_stop();
        retired.push(user.task);
    }
    debug!(
        scenario = scenario.name,
        remaining,
        spawned_total,
        "draining virtual users"
    );
    let draining = retired.len();
    for (index, task) in retired.into_iter().enumerate() {
        if let Err(e) = task.await {
            error!(scenario = scenario.name, error = %e, "virtual user task panicked");
        }
        if (index + 1) % 50 == 0 {
            info!(
                scenario = scenario.name,
                drained = index + 1,
                total = draining,
                "drain progress"
            );
        }
    }
    cx.checks.collector().set_active_users(scenario.name, 0);
    info!(
        scenario = scenario.name,
        users_spawned = spawned_total,
        "scenario complete"
    );
}

fn spawn_user(scenario: &Scenario, cx: Arc<RunContext>) -> UserHandle {
    let (stop_tx, stop_rx) = watch::channel(false);
    let flow = Arc::clone(&scenario.flow);
    let think_time = scenario.think_time;
    let task = tokio::spawn(user_loop(flow, cx, think_time, stop_rx));
    UserHandle {
        stop: stop_tx,
        task,
    }
}

/// One virtual user: think, run a pass, repeat until stopped. The stop
/// signal can cut the think-time sleep short but never a running pass.
async fn user_loop(
    flow: Arc<dyn UserFlow>,
    cx: Arc<RunContext>,
    think_time: Duration,
    mut stop: watch::Receiver<bool>,
) {
    loop {
        if *stop.borrow() {
            return;
        }
        tokio::select! {
            _ = tokio::time::sleep(think_time) => {}
            _ = stop.changed() => return,
        }
        flow.run_pass(Arc::clone(&cx)).await;
    }
}
