//! Account lifecycle scenario: open an account, fund it, set its overdraft
//! limit.
//!
//! This is the producer scenario. Every account it creates becomes an
//! operand for the PIX and card scenarios through the shared registry, so
//! its ramp leads the other two in the shipped profiles.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::actions::account;
use crate::context::RunContext;
use crate::scheduler::UserFlow;

pub struct AccountFlow;

impl UserFlow for AccountFlow {
    fn run_pass(&self, cx: Arc<RunContext>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            let outcome = account::create_account(&cx).await;
            // Follow-ups target the account created in this pass, so they
            // only run when creation passed and yielded an id.
            if let Some(conta_id) = outcome.entity_id() {
                account::deposit(&cx, conta_id).await;
                account::set_overdraft_limit(&cx, conta_id).await;
            }
        })
    }
}
