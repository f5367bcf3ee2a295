use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};

use crate::{
    dto::produto::{CreateProdutoRequest, NovoProduto, UpdateProdutoRequest},
    error::{AppError, AppResult},
    models::Produto,
    repository::produto::MSG_NOME_DUPLICADO,
    state::ProdutoState,
};

const MSG_NOME_REPETIDO: &str = "Produtos não podem possuir o mesmo nome.";

pub fn router() -> Router<ProdutoState> {
    Router::new()
        .route("/", get(listar_produtos).post(criar_produtos))
        .route("/categoria/{categoria}", get(listar_por_categoria))
        .route(
            "/{produto_id}",
            get(buscar_produto)
                .put(atualizar_produto)
                .delete(excluir_produto),
        )
}

#[utoipa::path(
    post,
    path = "/api/produto",
    request_body = CreateProdutoRequest,
    responses(
        (status = 201, description = "Produto(s) criado(s)", body = Produto),
        (status = 400, description = "Dados inválidos ou nome duplicado"),
    ),
    tag = "Produto"
)]
pub async fn criar_produtos(
    State(state): State<ProdutoState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    // A single object and a batch share the same route.
    let itens: Vec<Value> = match body {
        Value::Array(lista) => lista,
        outro => vec![outro],
    };
    if itens.is_empty() {
        return Err(AppError::BadRequest(
            "Dados do produto são obrigatórios".to_string(),
        ));
    }

    let mut validados: Vec<NovoProduto> = Vec::with_capacity(itens.len());
    let mut nomes = HashSet::new();
    for item in itens {
        let payload: CreateProdutoRequest = serde_json::from_value(item)
            .map_err(|_| AppError::BadRequest("Dados inválidos".to_string()))?;
        let novo = payload.validate().map_err(|errors| AppError::Validation {
            message: "Dados inválidos".to_string(),
            errors,
        })?;
        if !nomes.insert(novo.nome_produto.clone()) {
            return Err(AppError::BadRequest(MSG_NOME_REPETIDO.to_string()));
        }
        validados.push(novo);
    }

    let mut criados: Vec<Produto> = Vec::with_capacity(validados.len());
    for novo in validados {
        match state.repo.add_produto(novo).await {
            Ok(produto) => criados.push(produto),
            Err(AppError::BadRequest(mensagem)) if mensagem == MSG_NOME_DUPLICADO => {
                return Err(AppError::BadRequest(MSG_NOME_REPETIDO.to_string()));
            }
            Err(err) => return Err(err),
        }
    }

    let corpo = if criados.len() == 1 {
        serde_json::to_value(&criados[0])?
    } else {
        serde_json::to_value(&criados)?
    };
    Ok((StatusCode::CREATED, Json(corpo)))
}

#[utoipa::path(
    get,
    path = "/api/produto",
    responses(
        (status = 200, description = "Todos os produtos", body = [Produto]),
        (status = 404, description = "Nenhum produto cadastrado"),
    ),
    tag = "Produto"
)]
pub async fn listar_produtos(State(state): State<ProdutoState>) -> AppResult<Json<Vec<Produto>>> {
    let produtos = state.repo.get_all_produtos().await?;
    if produtos.is_empty() {
        return Err(AppError::NotFound("Nenhum produto encontrado.".to_string()));
    }
    Ok(Json(produtos))
}

#[utoipa::path(
    get,
    path = "/api/produto/{produto_id}",
    params(("produto_id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Produto),
        (status = 404, description = "Produto não encontrado"),
    ),
    tag = "Produto"
)]
pub async fn buscar_produto(
    State(state): State<ProdutoState>,
    Path(produto_id): Path<String>,
) -> AppResult<Json<Produto>> {
    let produto = state
        .repo
        .get_produto_by_produto_id(&produto_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;
    Ok(Json(produto))
}

#[utoipa::path(
    get,
    path = "/api/produto/categoria/{categoria}",
    params(("categoria" = String, Path, description = "Categoria do produto")),
    responses(
        (status = 200, description = "Produtos da categoria", body = [Produto]),
        (status = 404, description = "Nenhum produto nesta categoria"),
    ),
    tag = "Produto"
)]
pub async fn listar_por_categoria(
    State(state): State<ProdutoState>,
    Path(categoria): Path<String>,
) -> AppResult<Json<Vec<Produto>>> {
    let produtos = state.repo.get_produtos_by_categoria(&categoria).await?;
    if produtos.is_empty() {
        return Err(AppError::NotFound(
            "Nenhum produto encontrado nesta categoria.".to_string(),
        ));
    }
    Ok(Json(produtos))
}

#[utoipa::path(
    put,
    path = "/api/produto/{produto_id}",
    params(("produto_id" = String, Path, description = "ID do produto")),
    request_body = UpdateProdutoRequest,
    responses(
        (status = 200, description = "Produto atualizado", body = Produto),
        (status = 404, description = "Produto não encontrado"),
    ),
    tag = "Produto"
)]
pub async fn atualizar_produto(
    State(state): State<ProdutoState>,
    Path(produto_id): Path<String>,
    Json(payload): Json<UpdateProdutoRequest>,
) -> AppResult<Json<Produto>> {
    let produto = state
        .repo
        .update_produto(&produto_id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;
    Ok(Json(produto))
}

#[utoipa::path(
    delete,
    path = "/api/produto/{produto_id}",
    params(("produto_id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado"),
    ),
    tag = "Produto"
)]
pub async fn excluir_produto(
    State(state): State<ProdutoState>,
    Path(produto_id): Path<String>,
) -> AppResult<Json<Value>> {
    state
        .repo
        .delete_produto(&produto_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;
    Ok(Json(json!({ "message": "Produto excluído com sucesso." })))
}
