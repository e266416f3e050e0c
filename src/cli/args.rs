//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};

/// Load generator for a banking-style HTTP API
#[derive(Parser, Debug)]
#[command(name = "banco-load")]
#[command(about = "Drives accounts, PIX, and card workloads against a banking API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the load test
    Run(RunArgs),
    /// List the built-in load profiles and their ramp stages
    Profiles,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Base URL of the API under test
    #[arg(long, default_value = "http://localhost:8080", env = "BANCO_BASE_URL")]
    pub base_url: String,

    /// API flavor: classic (form bodies, 200 OK) or rest (JSON bodies, 201 Created)
    #[arg(
        long,
        default_value = "classic",
        value_parser = ["classic", "rest"],
        env = "BANCO_API_VARIANT"
    )]
    pub api_variant: String,

    /// Load profile to run
    #[arg(long, default_value = "standard", value_parser = ["smoke", "standard", "stress"])]
    pub profile: String,

    /// Restrict the run to a single scenario
    #[arg(long, default_value = "all", value_parser = ["all", "accounts", "pix", "cards"])]
    pub scenario: String,

    /// Think time between passes for each virtual user, in milliseconds
    #[arg(long, default_value = "1000")]
    pub think_time_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub request_timeout: u64,

    /// Seconds between live metric reports (0 disables the live view)
    #[arg(long, default_value = "5")]
    pub report_interval: u64,

    /// Fail the run unless p95 request latency stays below this many milliseconds
    #[arg(long, default_value = "2000")]
    pub max_p95_ms: u64,

    /// Fail the run unless the request failure rate stays below this fraction
    #[arg(long, default_value = "0.1")]
    pub max_failure_rate: f64,

    /// Expected success status, overriding the API variant's default
    #[arg(long)]
    pub expect_status: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
