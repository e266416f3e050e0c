// Workload actions
// One function per API operation; each maps to exactly one named check

pub mod account;
pub mod card;
pub mod pix;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tokio::time::Instant;

use crate::check::Outcome;
use crate::context::RunContext;

/// Sends one POST and records its check: started mark, latency, then
/// classification against the expected status.
pub(crate) async fn post_checked<T: Serialize>(
    cx: &RunContext,
    name: &'static str,
    path: &str,
    body: &T,
) -> Outcome {
    cx.checks.request_started();
    let start = Instant::now();
    let result = cx.client.post(path, body).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    cx.checks.classify(name, result, latency_ms)
}

/// Random alphanumeric filler for holder names and PIX key values.
pub(crate) fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
