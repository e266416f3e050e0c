//! PIX actions: key registration, QR code generation, scheduled transfers.

use chrono::{Days, Utc};
use serde::Serialize;

use super::{post_checked, random_string};
use crate::check::Outcome;
use crate::context::RunContext;
use crate::registry::EntityKind;

#[derive(Debug, Serialize)]
struct RegisterKeyRequest<'a> {
    conta_id: &'a str,
    tipo_chave: &'static str,
    valor_chave: String,
}

#[derive(Debug, Serialize)]
struct QrCodeRequest<'a> {
    chave_id: &'a str,
    tipo: &'static str,
    valor: u32,
    descricao: &'static str,
}

#[derive(Debug, Serialize)]
struct ScheduleTransferRequest<'a> {
    chave_origem: &'a str,
    chave_destino: String,
    valor: u32,
    data: String,
}

/// Registers a random email-type PIX key against an account and publishes
/// the key id to the registry on success.
pub async fn register_key(cx: &RunContext, conta_id: &str) -> Outcome {
    let body = RegisterKeyRequest {
        conta_id,
        tipo_chave: "email",
        valor_chave: format!("teste{}@teste.com", random_string(8)),
    };
    let outcome = post_checked(cx, "pix key registered", "/pix/registrar", &body).await;
    if let Some(id) = outcome.entity_id() {
        cx.ids.add(EntityKind::PixKey, id);
    }
    outcome
}

/// Generates a static QR code for a PIX key.
pub async fn generate_qr_code(cx: &RunContext, chave_id: &str) -> Outcome {
    let body = QrCodeRequest {
        chave_id,
        tipo: "estatico",
        valor: 100,
        descricao: "Teste de carga QR Code",
    };
    post_checked(cx, "qr code generated", "/pix/qrcode", &body).await
}

/// Schedules a transfer from `chave_origem` to a randomly drawn key for
/// tomorrow. Skips unless at least two keys are registered; the drawn
/// destination may coincide with the origin, which the API accepts.
pub async fn schedule_transfer(cx: &RunContext, chave_origem: &str) -> Outcome {
    const CHECK: &str = "pix transfer scheduled";
    if cx.ids.len(EntityKind::PixKey) < 2 {
        return cx.checks.skip(CHECK);
    }
    let chave_destino = match cx.ids.pick_random(EntityKind::PixKey) {
        Ok(id) => id,
        Err(_) => return cx.checks.skip(CHECK),
    };
    let body = ScheduleTransferRequest {
        chave_origem,
        chave_destino,
        valor: 50,
        data: tomorrow(),
    };
    post_checked(cx, CHECK, "/pix/agendar", &body).await
}

/// Tomorrow's timestamp in the `YYYY-MM-DDTHH:MM:SS` layout the scheduling
/// endpoint parses.
fn tomorrow() -> String {
    (Utc::now() + Days::new(1))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
