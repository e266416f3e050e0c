//! Card scenario: issue a card on a random account, then purchase, issue a
//! virtual card, and pay the bill with it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::actions::card;
use crate::context::RunContext;
use crate::registry::EntityKind;
use crate::scheduler::UserFlow;

pub struct CardFlow;

impl UserFlow for CardFlow {
    fn run_pass(&self, cx: Arc<RunContext>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            let conta_id = match cx.ids.pick_random(EntityKind::Account) {
                Ok(id) => id,
                Err(_) => {
                    cx.checks.skip("card created");
                    return;
                }
            };
            let outcome = card::create_card(&cx, &conta_id).await;
            if let Some(cartao_id) = outcome.entity_id() {
                card::purchase(&cx, cartao_id).await;
                card::issue_virtual_card(&cx, cartao_id).await;
                card::pay_bill(&cx, cartao_id).await;
            }
        })
    }
}
