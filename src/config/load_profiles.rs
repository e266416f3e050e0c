//! Load profiles: named presets mapping each scenario to a ramp profile.

use std::sync::Arc;
use std::time::Duration;

use crate::scenarios::{AccountFlow, CardFlow, PixFlow};
use crate::scheduler::{RampProfile, Scenario, Stage};

pub const PROFILE_NAMES: [&str; 3] = ["smoke", "standard", "stress"];

/// Returns the scenario set for the given profile name. Unknown names fall
/// back to `standard` with a warning.
pub fn get_load_profile(profile: &str, think_time: Duration) -> Vec<Scenario> {
    match profile {
        "smoke" => smoke_profile(think_time),
        "standard" => standard_profile(think_time),
        "stress" => stress_profile(think_time),
        _ => {
            tracing::warn!("Unknown profile '{}', using 'standard'", profile);
            standard_profile(think_time)
        }
    }
}

/// Keeps only the named scenario, or everything for `all`.
pub fn filter_scenarios(scenarios: Vec<Scenario>, which: &str) -> Vec<Scenario> {
    if which == "all" {
        scenarios
    } else {
        scenarios.into_iter().filter(|s| s.name == which).collect()
    }
}

fn scenario_set(
    think_time: Duration,
    accounts: Vec<Stage>,
    pix: Vec<Stage>,
    cards: Vec<Stage>,
) -> Vec<Scenario> {
    vec![
        Scenario {
            name: "accounts",
            profile: RampProfile::new(0, accounts),
            think_time,
            flow: Arc::new(AccountFlow),
        },
        Scenario {
            name: "pix",
            profile: RampProfile::new(0, pix),
            think_time,
            flow: Arc::new(PixFlow),
        },
        Scenario {
            name: "cards",
            profile: RampProfile::new(0, cards),
            think_time,
            flow: Arc::new(CardFlow),
        },
    ]
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Quick end-to-end sanity run against a fresh deployment
/// Sized for: under a minute, a handful of users per scenario
fn smoke_profile(think_time: Duration) -> Vec<Scenario> {
    scenario_set(
        think_time,
        vec![
            Stage::new(secs(10), 5),
            Stage::new(secs(15), 5),
            Stage::new(secs(5), 0),
        ],
        vec![
            Stage::new(secs(10), 3),
            Stage::new(secs(15), 3),
            Stage::new(secs(5), 0),
        ],
        vec![
            Stage::new(secs(10), 2),
            Stage::new(secs(15), 2),
            Stage::new(secs(5), 0),
        ],
    )
}

/// The default workload: account creation leads, PIX and card traffic
/// ride on the identifiers it publishes
/// Sized for: 50/30/20 peak users over five to seven minutes
fn standard_profile(think_time: Duration) -> Vec<Scenario> {
    scenario_set(
        think_time,
        vec![
            Stage::new(secs(60), 50),
            Stage::new(secs(180), 50),
            Stage::new(secs(60), 0),
        ],
        vec![
            Stage::new(secs(60), 30),
            Stage::new(secs(300), 30),
            Stage::new(secs(60), 0),
        ],
        vec![
            Stage::new(secs(60), 20),
            Stage::new(secs(240), 20),
            Stage::new(secs(60), 0),
        ],
    )
}

/// Saturation run at four times the standard peaks
/// Sized for: finding the knee of the latency curve
fn stress_profile(think_time: Duration) -> Vec<Scenario> {
    scenario_set(
        think_time,
        vec![
            Stage::new(secs(60), 200),
            Stage::new(secs(240), 200),
            Stage::new(secs(60), 0),
        ],
        vec![
            Stage::new(secs(60), 120),
            Stage::new(secs(360), 120),
            Stage::new(secs(60), 0),
        ],
        vec![
            Stage::new(secs(60), 80),
            Stage::new(secs(300), 80),
            Stage::new(secs(60), 0),
        ],
    )
}

/// Prints every profile's scenarios and stage tables, for `banco-load
/// profiles`.
pub fn print_profiles() {
    println!("Available load profiles:\n");
    for name in PROFILE_NAMES {
        let suffix = if name == "standard" { " (default)" } else { "" };
        println!("{name}{suffix}");
        for scenario in get_load_profile(name, Duration::from_secs(1)) {
            let stages: Vec<String> = scenario
                .profile
                .stages()
                .iter()
                .map(|s| format!("{}s→{}", s.duration.as_secs(), s.target))
                .collect();
            println!(
                "  {:<10} {}  (total {}s, peak {} users)",
                scenario.name,
                stages.join(", "),
                scenario.profile.total_duration().as_secs(),
                scenario.profile.peak_target(),
            );
        }
        println!();
    }
}
