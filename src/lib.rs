//! Load-generation harness for a banking-style HTTP API.
//!
//! The harness drives concurrent virtual users through three workload
//! scenarios (account lifecycle, PIX payments, card operations) against a
//! deployed API, records per-check and latency metrics, and gates the exit
//! code on latency and failure-rate thresholds.

pub mod actions;
pub mod api;
pub mod check;
pub mod cli;
pub mod config;
pub mod context;
pub mod metrics;
pub mod registry;
pub mod run;
pub mod scenarios;
pub mod scheduler;
