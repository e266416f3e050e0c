//! Outcome classification for workload actions.
//!
//! Every action maps to exactly one named check. The [`Checker`] compares
//! the response status against the expected success status for the active
//! API variant (or an operator override), records the result, and never
//! lets a failure escape as an error: a virtual user that hits a failing
//! endpoint keeps looping.

use reqwest::StatusCode;

use crate::api::{ApiError, ApiResponse};
use crate::metrics::MetricsCollector;

/// Result of one workload action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response matched the expected status. Creation actions carry the
    /// extracted identifier, when the body yielded one.
    Pass { entity_id: Option<String> },
    /// Transport failed or the status did not match.
    Fail,
    /// A required operand was missing; nothing was sent.
    Skip,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip)
    }

    /// The identifier published by a passing creation action.
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Outcome::Pass { entity_id } => entity_id.as_deref(),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Checker {
    collector: MetricsCollector,
    expect: StatusCode,
}

impl Checker {
    pub fn new(collector: MetricsCollector, expect: StatusCode) -> Self {
        Self { collector, expect }
    }

    pub fn expected_status(&self) -> StatusCode {
        self.expect
    }

    pub fn collector(&self) -> &MetricsCollector {
        &self.collector
    }

    /// Marks one request as started, for the in-flight gauge.
    pub fn request_started(&self) {
        self.collector.request_started();
    }

    /// Classifies a finished request against the expected status and records
    /// the named check.
    pub fn classify(
        &self,
        name: &'static str,
        result: Result<ApiResponse, ApiError>,
        latency_ms: u64,
    ) -> Outcome {
        match result {
            Ok(response) if response.status == self.expect => {
                self.collector.request_succeeded(latency_ms);
                self.collector.check_passed(name);
                Outcome::Pass {
                    entity_id: response.entity_id(),
                }
            }
            Ok(response) => {
                self.collector.request_failed(latency_ms);
                self.collector.check_failed(name);
                tracing::warn!(
                    check = name,
                    status = response.status.as_u16(),
                    expected = self.expect.as_u16(),
                    "check failed"
                );
                Outcome::Fail
            }
            Err(error) => {
                self.collector.request_failed(latency_ms);
                self.collector.check_failed(name);
                tracing::warn!(check = name, error = %error, "request failed");
                Outcome::Fail
            }
        }
    }

    /// Records a skipped pass: the check's operand was not registered yet,
    /// so no request went out.
    pub fn skip(&self, name: &'static str) -> Outcome {
        self.collector.pass_skipped();
        tracing::debug!(check = name, "skipped, operand not registered yet");
        Outcome::Skip
    }
}
