use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};

use crate::{
    dto::cliente::CreateClienteRequest,
    error::{AppError, AppResult},
    models::Cliente,
    state::ClienteState,
};

pub fn router() -> Router<ClienteState> {
    Router::new()
        .route("/", get(listar_clientes).post(registrar_cliente))
        .route("/{cliente_id}", get(buscar_cliente))
}

#[utoipa::path(
    post,
    path = "/api/cliente",
    request_body = CreateClienteRequest,
    responses(
        (status = 200, description = "Cliente já registrado ou anônimo"),
        (status = 201, description = "Cliente criado", body = Cliente),
    ),
    tag = "Cliente"
)]
pub async fn registrar_cliente(
    State(state): State<ClienteState>,
    Json(payload): Json<CreateClienteRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    if let Some(cpf) = payload.cpf.as_deref().filter(|cpf| !cpf.is_empty()) {
        if let Some(cliente) = state.repo.find_cliente_by_cpf(cpf).await? {
            return Ok((
                StatusCode::OK,
                Json(json!({ "message": "Cliente já registrado.", "cliente": cliente })),
            ));
        }
    }

    if payload.cpf.is_none() && payload.nome_cliente.is_none() && payload.email.is_none() {
        return Ok((
            StatusCode::OK,
            Json(json!({ "message": "Continuando como anônimo." })),
        ));
    }

    let cliente = state.repo.add_cliente(payload).await?;
    Ok((StatusCode::CREATED, Json(serde_json::to_value(cliente)?)))
}

#[utoipa::path(
    get,
    path = "/api/cliente/{cliente_id}",
    params(("cliente_id" = String, Path, description = "ID amigável do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Cliente),
        (status = 404, description = "Cliente não encontrado"),
    ),
    tag = "Cliente"
)]
pub async fn buscar_cliente(
    State(state): State<ClienteState>,
    Path(cliente_id): Path<String>,
) -> AppResult<Json<Cliente>> {
    let cliente = state
        .repo
        .get_cliente_by_cliente_id(&cliente_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente não encontrado.".to_string()))?;
    Ok(Json(cliente))
}

#[utoipa::path(
    get,
    path = "/api/cliente",
    responses(
        (status = 200, description = "Todos os clientes", body = [Cliente]),
        (status = 404, description = "Nenhum cliente cadastrado"),
    ),
    tag = "Cliente"
)]
pub async fn listar_clientes(State(state): State<ClienteState>) -> AppResult<Json<Vec<Cliente>>> {
    let clientes = state.repo.get_all_clientes().await?;
    if clientes.is_empty() {
        return Err(AppError::NotFound("Nenhum cliente encontrado.".to_string()));
    }
    Ok(Json(clientes))
}
