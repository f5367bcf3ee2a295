use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};

use crate::{error::AppResult, models::Pagamento, state::PedidoState};

pub fn router() -> Router<PedidoState> {
    Router::new().route("/{pedido_id}", post(criar_pagamento))
}

#[utoipa::path(
    post,
    path = "/api/pagamento/{pedido_id}",
    params(("pedido_id" = String, Path, description = "ID do pedido a pagar")),
    responses(
        (status = 201, description = "Pagamento iniciado", body = Pagamento),
        (status = 404, description = "Pedido, cliente ou produto não encontrado"),
        (status = 502, description = "Falha no gateway de pagamento"),
    ),
    tag = "Pagamento"
)]
pub async fn criar_pagamento(
    State(state): State<PedidoState>,
    Path(pedido_id): Path<String>,
) -> AppResult<(StatusCode, Json<Pagamento>)> {
    let pagamento = state.pagamentos.criar_pagamento(&pedido_id).await?;
    Ok((StatusCode::CREATED, Json(pagamento)))
}
