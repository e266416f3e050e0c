//! Account actions: open, fund, and configure overdraft.

use serde::Serialize;

use super::{post_checked, random_string};
use crate::check::Outcome;
use crate::context::RunContext;
use crate::registry::EntityKind;

#[derive(Debug, Serialize)]
struct CreateAccountRequest {
    titular: String,
}

#[derive(Debug, Serialize)]
struct DepositRequest<'a> {
    conta_id: &'a str,
    valor: u32,
    categoria: &'static str,
    descricao: &'static str,
}

#[derive(Debug, Serialize)]
struct OverdraftRequest<'a> {
    conta_id: &'a str,
    limite: u32,
}

/// Opens an account with a random holder name and publishes the new
/// account id to the registry on success.
pub async fn create_account(cx: &RunContext) -> Outcome {
    let body = CreateAccountRequest {
        titular: format!("Titular {}", random_string(8)),
    };
    let outcome = post_checked(cx, "account created", "/conta/criar", &body).await;
    if let Some(id) = outcome.entity_id() {
        cx.ids.add(EntityKind::Account, id);
    }
    outcome
}

/// Deposits the initial balance into a freshly opened account.
pub async fn deposit(cx: &RunContext, conta_id: &str) -> Outcome {
    let body = DepositRequest {
        conta_id,
        valor: 1000,
        categoria: "Depósito inicial",
        descricao: "Teste de carga",
    };
    post_checked(cx, "deposit accepted", "/conta/depositar", &body).await
}

/// Sets the overdraft limit on an account.
pub async fn set_overdraft_limit(cx: &RunContext, conta_id: &str) -> Outcome {
    let body = OverdraftRequest {
        conta_id,
        limite: 500,
    };
    post_checked(cx, "overdraft limit set", "/conta/cheque-especial", &body).await
}
