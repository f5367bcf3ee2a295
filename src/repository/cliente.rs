use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    db::OrmConn,
    dto::cliente::CreateClienteRequest,
    entity::clientes::{ActiveModel, Column, Entity as Clientes, Model as ClienteModel},
    error::AppResult,
    models::Cliente,
    repository::novo_id,
};

/// Persistence contract for clientes. Absence is `None`, never an error.
#[async_trait]
pub trait ClienteRepository: Send + Sync {
    async fn add_cliente(&self, data: CreateClienteRequest) -> AppResult<Cliente>;
    async fn get_cliente_by_cliente_id(&self, cliente_id: &str) -> AppResult<Option<Cliente>>;
    async fn find_cliente_by_cpf(&self, cpf: &str) -> AppResult<Option<Cliente>>;
    async fn get_all_clientes(&self) -> AppResult<Vec<Cliente>>;
}

pub struct OrmClienteRepository {
    orm: OrmConn,
}

impl OrmClienteRepository {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl ClienteRepository for OrmClienteRepository {
    async fn add_cliente(&self, data: CreateClienteRequest) -> AppResult<Cliente> {
        let active = ActiveModel {
            cliente_id: Set(novo_id()),
            cpf: Set(data.cpf),
            nome_cliente: Set(data.nome_cliente),
            email: Set(data.email),
            registrado: Set(false),
            data_registro: Set(Utc::now().into()),
        };
        let cliente = active.insert(&self.orm).await?;
        Ok(cliente_from_entity(cliente))
    }

    async fn get_cliente_by_cliente_id(&self, cliente_id: &str) -> AppResult<Option<Cliente>> {
        let cliente = Clientes::find_by_id(cliente_id).one(&self.orm).await?;
        Ok(cliente.map(cliente_from_entity))
    }

    async fn find_cliente_by_cpf(&self, cpf: &str) -> AppResult<Option<Cliente>> {
        let cliente = Clientes::find()
            .filter(Column::Cpf.eq(cpf))
            .one(&self.orm)
            .await?;
        Ok(cliente.map(cliente_from_entity))
    }

    async fn get_all_clientes(&self) -> AppResult<Vec<Cliente>> {
        let clientes = Clientes::find().all(&self.orm).await?;
        Ok(clientes.into_iter().map(cliente_from_entity).collect())
    }
}

fn cliente_from_entity(model: ClienteModel) -> Cliente {
    Cliente {
        cliente_id: model.cliente_id,
        cpf: model.cpf,
        nome_cliente: model.nome_cliente,
        email: model.email,
        registrado: model.registrado,
        data_registro: model.data_registro.with_timezone(&Utc),
    }
}
