//! PIX scenario: register a key on a random account, generate a QR code
//! for it, and schedule a transfer to another key.
//!
//! The whole pass is a no-op until the account scenario has published at
//! least two accounts, mirroring the warm-up window at the start of a run.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::actions::pix;
use crate::context::RunContext;
use crate::registry::EntityKind;
use crate::scheduler::UserFlow;

pub struct PixFlow;

impl UserFlow for PixFlow {
    fn run_pass(&self, cx: Arc<RunContext>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            if cx.ids.len(EntityKind::Account) < 2 {
                cx.checks.skip("pix key registered");
                return;
            }
            let conta_id = match cx.ids.pick_random(EntityKind::Account) {
                Ok(id) => id,
                Err(_) => {
                    cx.checks.skip("pix key registered");
                    return;
                }
            };
            let outcome = pix::register_key(&cx, &conta_id).await;
            // QR code and transfer both hang off the key registered in this
            // pass; the transfer additionally guards on a second key existing.
            if let Some(chave_id) = outcome.entity_id() {
                pix::generate_qr_code(&cx, chave_id).await;
                pix::schedule_transfer(&cx, chave_id).await;
            }
        })
    }
}
