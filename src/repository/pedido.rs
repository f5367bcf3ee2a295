use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    db::OrmConn,
    dto::pedido::NovoPedido,
    entity::pedidos::{ActiveModel, Column, Entity as Pedidos, ItensPedido, Model as PedidoModel},
    error::AppResult,
    models::Pedido,
    repository::novo_id,
};

pub const STATUS_FINALIZADO: &str = "Finalizado";

#[async_trait]
pub trait PedidoRepository: Send + Sync {
    async fn add_pedido(&self, data: NovoPedido) -> AppResult<Pedido>;
    async fn get_pedido_by_pedido_id(&self, pedido_id: &str) -> AppResult<Option<Pedido>>;
    async fn get_all_pedidos(&self) -> AppResult<Vec<Pedido>>;
    /// Orders still in the kitchen: everything except "Finalizado",
    /// oldest first, ties broken by the explicit priority column.
    async fn get_pedidos_ativos(&self) -> AppResult<Vec<Pedido>>;
    async fn update_pedido_status(
        &self,
        pedido_id: &str,
        novo_status: &str,
    ) -> AppResult<Option<Pedido>>;
    async fn update_status_pagamento(
        &self,
        pedido_id: &str,
        status_pagamento: &str,
    ) -> AppResult<Option<Pedido>>;
}

pub struct OrmPedidoRepository {
    orm: OrmConn,
}

impl OrmPedidoRepository {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl PedidoRepository for OrmPedidoRepository {
    async fn add_pedido(&self, data: NovoPedido) -> AppResult<Pedido> {
        let active = ActiveModel {
            pedido_id: Set(novo_id()),
            cliente: Set(data.cliente),
            produtos: Set(ItensPedido(data.produtos)),
            total: Set(data.total),
            status: Set("Recebido".to_string()),
            datapedido: Set(Utc::now().into()),
            status_pagamento: Set("Pendente".to_string()),
            pagamento_id: Set(None),
            prioridade: Set(0),
        };
        let pedido = active.insert(&self.orm).await?;
        Ok(pedido_from_entity(pedido))
    }

    async fn get_pedido_by_pedido_id(&self, pedido_id: &str) -> AppResult<Option<Pedido>> {
        let pedido = Pedidos::find_by_id(pedido_id).one(&self.orm).await?;
        Ok(pedido.map(pedido_from_entity))
    }

    async fn get_all_pedidos(&self) -> AppResult<Vec<Pedido>> {
        let pedidos = Pedidos::find().all(&self.orm).await?;
        Ok(pedidos.into_iter().map(pedido_from_entity).collect())
    }

    async fn get_pedidos_ativos(&self) -> AppResult<Vec<Pedido>> {
        let pedidos = Pedidos::find()
            .filter(Column::Status.ne(STATUS_FINALIZADO))
            .order_by_asc(Column::Datapedido)
            .order_by_asc(Column::Prioridade)
            .all(&self.orm)
            .await?;
        Ok(pedidos.into_iter().map(pedido_from_entity).collect())
    }

    async fn update_pedido_status(
        &self,
        pedido_id: &str,
        novo_status: &str,
    ) -> AppResult<Option<Pedido>> {
        let pedido = Pedidos::find_by_id(pedido_id).one(&self.orm).await?;
        let pedido = match pedido {
            Some(pedido) => pedido,
            None => return Ok(None),
        };

        let mut active: ActiveModel = pedido.into();
        active.status = Set(novo_status.to_string());
        let pedido = active.update(&self.orm).await?;
        Ok(Some(pedido_from_entity(pedido)))
    }

    async fn update_status_pagamento(
        &self,
        pedido_id: &str,
        status_pagamento: &str,
    ) -> AppResult<Option<Pedido>> {
        let pedido = Pedidos::find_by_id(pedido_id).one(&self.orm).await?;
        let pedido = match pedido {
            Some(pedido) => pedido,
            None => return Ok(None),
        };

        let mut active: ActiveModel = pedido.into();
        active.status_pagamento = Set(status_pagamento.to_string());
        let pedido = active.update(&self.orm).await?;
        Ok(Some(pedido_from_entity(pedido)))
    }
}

fn pedido_from_entity(model: PedidoModel) -> Pedido {
    Pedido {
        pedido_id: model.pedido_id,
        cliente: model.cliente,
        produtos: model.produtos.0,
        total: model.total,
        status: model.status,
        datapedido: model.datapedido.with_timezone(&Utc),
        status_pagamento: model.status_pagamento,
        pagamento_id: model.pagamento_id,
        prioridade: model.prioridade,
    }
}
