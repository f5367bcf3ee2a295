use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::Value;

use crate::{
    dto::pedido::{CreatePedidoRequest, UpdateStatusRequest},
    error::{AppError, AppResult},
    models::Pedido,
    state::PedidoState,
};

const MSG_PRODUTOS_INVALIDOS: &str = "Dados inválidos. Produtos é obrigatório e deve ser um array";

pub fn router() -> Router<PedidoState> {
    Router::new()
        .route("/", get(listar_pedidos).post(criar_pedido))
        .route("/ativos", get(listar_pedidos_ativos))
        .route("/{pedido_id}", get(buscar_pedido))
        .route("/{pedido_id}/status", put(atualizar_status))
}

#[utoipa::path(
    post,
    path = "/api/pedido",
    request_body = CreatePedidoRequest,
    responses(
        (status = 201, description = "Pedido criado", body = Pedido),
        (status = 400, description = "Produtos ausente ou malformado"),
        (status = 404, description = "Cliente ou produto não encontrado"),
    ),
    tag = "Pedido"
)]
pub async fn criar_pedido(
    State(state): State<PedidoState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Pedido>)> {
    // The raw body is inspected first so a string/missing `produtos` gets
    // the exact validation message instead of a deserialization error.
    let produtos_validos = body
        .get("produtos")
        .and_then(Value::as_array)
        .is_some_and(|produtos| !produtos.is_empty());
    if !produtos_validos {
        return Err(AppError::BadRequest(MSG_PRODUTOS_INVALIDOS.to_string()));
    }

    let data: CreatePedidoRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Dados inválidos".to_string()))?;

    let pedido = state.pedidos.criar_pedido(data).await?;
    // Separate status write after creation, not atomic with the insert.
    let pedido = state
        .repo
        .update_pedido_status(&pedido.pedido_id, "Recebido")
        .await?
        .unwrap_or(pedido);

    Ok((StatusCode::CREATED, Json(pedido)))
}

#[utoipa::path(
    get,
    path = "/api/pedido",
    responses(
        (status = 200, description = "Todos os pedidos", body = [Pedido]),
        (status = 404, description = "Nenhum pedido cadastrado"),
    ),
    tag = "Pedido"
)]
pub async fn listar_pedidos(State(state): State<PedidoState>) -> AppResult<Json<Vec<Pedido>>> {
    let pedidos = state.repo.get_all_pedidos().await?;
    if pedidos.is_empty() {
        return Err(AppError::NotFound("Nenhum pedido encontrado.".to_string()));
    }
    Ok(Json(pedidos))
}

#[utoipa::path(
    get,
    path = "/api/pedido/ativos",
    responses(
        (status = 200, description = "Pedidos não finalizados, mais antigos primeiro", body = [Pedido]),
        (status = 404, description = "Nenhum pedido ativo"),
    ),
    tag = "Pedido"
)]
pub async fn listar_pedidos_ativos(
    State(state): State<PedidoState>,
) -> AppResult<Json<Vec<Pedido>>> {
    let pedidos = state.repo.get_pedidos_ativos().await?;
    if pedidos.is_empty() {
        return Err(AppError::NotFound(
            "Nenhum pedido encontrado conforme os critérios.".to_string(),
        ));
    }
    Ok(Json(pedidos))
}

#[utoipa::path(
    get,
    path = "/api/pedido/{pedido_id}",
    params(("pedido_id" = String, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido", body = Pedido),
        (status = 404, description = "Pedido não encontrado"),
    ),
    tag = "Pedido"
)]
pub async fn buscar_pedido(
    State(state): State<PedidoState>,
    Path(pedido_id): Path<String>,
) -> AppResult<Json<Pedido>> {
    let pedido = state
        .repo
        .get_pedido_by_pedido_id(&pedido_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Pedido não encontrado.".to_string()))?;
    Ok(Json(pedido))
}

#[utoipa::path(
    put,
    path = "/api/pedido/{pedido_id}/status",
    params(("pedido_id" = String, Path, description = "ID do pedido")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Pedido atualizado", body = Pedido),
        (status = 400, description = "novoStatus ausente"),
        (status = 404, description = "Pedido não encontrado"),
    ),
    tag = "Pedido"
)]
pub async fn atualizar_status(
    State(state): State<PedidoState>,
    Path(pedido_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Pedido>> {
    let novo_status = payload
        .novo_status
        .as_deref()
        .filter(|status| !status.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("Dados inválidos. novoStatus é obrigatório".to_string())
        })?;

    let pedido = state
        .repo
        .update_pedido_status(&pedido_id, novo_status)
        .await?
        .ok_or_else(|| AppError::NotFound("Pedido não encontrado.".to_string()))?;
    Ok(Json(pedido))
}
