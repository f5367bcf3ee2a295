use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub cliente_id: String,
    pub cpf: Option<String>,
    pub nome_cliente: Option<String>,
    pub email: Option<String>,
    pub registrado: bool,
    pub data_registro: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub produto_id: String,
    pub nome_produto: String,
    pub descricao_produto: String,
    pub preco_produto: f64,
    pub categoria_produto: String,
}

/// Line item of an order, with the product name and price denormalized at
/// the time the order was priced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedido {
    pub produto: String,
    pub nome_produto: String,
    pub preco_produto: f64,
    pub quantidade: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub pedido_id: String,
    pub cliente: Option<String>,
    pub produtos: Vec<ItemPedido>,
    pub total: f64,
    pub status: String,
    pub datapedido: DateTime<Utc>,
    pub status_pagamento: String,
    pub pagamento_id: Option<String>,
    pub prioridade: i32,
}

/// Payment summary returned to the caller; never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagamento {
    pub pedido_id: String,
    pub valor: f64,
    pub status: String,
    pub qr_code_link: String,
}
