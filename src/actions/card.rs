//! Card actions: issue a card, purchase in installments, issue a virtual
//! card, pay the bill.

use serde::Serialize;

use super::post_checked;
use crate::check::Outcome;
use crate::context::RunContext;
use crate::registry::EntityKind;

#[derive(Debug, Serialize)]
struct CreateCardRequest<'a> {
    conta_id: &'a str,
}

#[derive(Debug, Serialize)]
struct PurchaseRequest<'a> {
    cartao_id: &'a str,
    valor: u32,
    estabelecimento: &'static str,
    parcelas: u8,
}

#[derive(Debug, Serialize)]
struct VirtualCardRequest<'a> {
    cartao_id: &'a str,
}

#[derive(Debug, Serialize)]
struct PayBillRequest<'a> {
    cartao_id: &'a str,
    valor: u32,
}

/// Issues a card for an account and publishes the card id on success.
pub async fn create_card(cx: &RunContext, conta_id: &str) -> Outcome {
    let body = CreateCardRequest { conta_id };
    let outcome = post_checked(cx, "card created", "/cartao/criar", &body).await;
    if let Some(id) = outcome.entity_id() {
        cx.ids.add(EntityKind::Card, id);
    }
    outcome
}

/// Makes a fixed-amount purchase in three installments.
pub async fn purchase(cx: &RunContext, cartao_id: &str) -> Outcome {
    let body = PurchaseRequest {
        cartao_id,
        valor: 200,
        estabelecimento: "Loja Teste",
        parcelas: 3,
    };
    post_checked(cx, "card purchase accepted", "/cartao/comprar", &body).await
}

/// Issues a virtual card bound to a physical card. The response carries a
/// card number rather than an id, so nothing is published.
pub async fn issue_virtual_card(cx: &RunContext, cartao_id: &str) -> Outcome {
    let body = VirtualCardRequest { cartao_id };
    post_checked(cx, "virtual card issued", "/cartao/virtual", &body).await
}

/// Pays part of the card bill.
pub async fn pay_bill(cx: &RunContext, cartao_id: &str) -> Outcome {
    let body = PayBillRequest {
        cartao_id,
        valor: 100,
    };
    post_checked(cx, "bill payment accepted", "/cartao/pagar", &body).await
}
