use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::pedido::WebhookNotification, error::AppResult,
    services::pagamento_service::mapear_status_pagamento, state::PedidoState,
};

pub fn router() -> Router<PedidoState> {
    Router::new().route("/pagseguro", post(receber_notificacao))
}

/// Asynchronous PagSeguro notification. Best-effort, at-most-once: no
/// signature check, no idempotency key, and a reference to an unknown order
/// still answers 200 so the gateway does not keep retrying.
#[utoipa::path(
    post,
    path = "/api/webhook/pagseguro",
    request_body = WebhookNotification,
    responses(
        (status = 200, description = "Notificação recebida"),
        (status = 500, description = "Falha interna ao processar"),
    ),
    tag = "Webhook"
)]
pub async fn receber_notificacao(
    State(state): State<PedidoState>,
    Json(notification): Json<WebhookNotification>,
) -> AppResult<&'static str> {
    tracing::info!(event = ?notification.event, "notificação do PagSeguro recebida");

    if notification.event.as_deref() == Some("transaction") {
        if let Some(data) = notification.data {
            if let (Some(reference_id), Some(status)) = (data.reference_id, data.status) {
                let status_pagamento = mapear_status_pagamento(&status);
                state
                    .repo
                    .update_status_pagamento(&reference_id, status_pagamento)
                    .await?;
                tracing::info!(
                    pedido_id = %reference_id,
                    status = %status_pagamento,
                    "status de pagamento atualizado"
                );
            }
        }
    }

    Ok("Notificação recebida")
}
