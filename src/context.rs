//! Shared per-run state handed to every virtual user.

use crate::api::BankClient;
use crate::check::Checker;
use crate::registry::IdRegistry;

/// Everything a virtual user needs to execute a scenario pass: the HTTP
/// client, the identifier registry, and the check recorder. One instance
/// exists per run, shared behind an `Arc`.
pub struct RunContext {
    pub client: BankClient,
    pub ids: IdRegistry,
    pub checks: Checker,
}

impl RunContext {
    pub fn new(client: BankClient, ids: IdRegistry, checks: Checker) -> Self {
        Self { client, ids, checks }
    }
}
