use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::ItemPedido;

/// Line items are stored denormalized as a single jsonb column; orders
/// reference clientes/produtos only by loose string keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ItensPedido(pub Vec<ItemPedido>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedidos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pedido_id: String,
    pub cliente: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub produtos: ItensPedido,
    pub total: f64,
    pub status: String,
    pub datapedido: DateTimeWithTimeZone,
    pub status_pagamento: String,
    pub pagamento_id: Option<String>,
    pub prioridade: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
