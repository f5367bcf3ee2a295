use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};

use crate::{
    db::OrmConn,
    dto::produto::{NovoProduto, UpdateProdutoRequest},
    entity::produtos::{ActiveModel, Column, Entity as Produtos, Model as ProdutoModel},
    error::{AppError, AppResult},
    models::Produto,
    repository::novo_id,
};

pub const MSG_NOME_DUPLICADO: &str = "Produto com este nome já existe.";

#[async_trait]
pub trait ProdutoRepository: Send + Sync {
    /// Inserts a product, refusing duplicate names.
    async fn add_produto(&self, data: NovoProduto) -> AppResult<Produto>;
    async fn get_produto_by_produto_id(&self, produto_id: &str) -> AppResult<Option<Produto>>;
    async fn get_all_produtos(&self) -> AppResult<Vec<Produto>>;
    async fn get_produtos_by_categoria(&self, categoria: &str) -> AppResult<Vec<Produto>>;
    async fn update_produto(
        &self,
        produto_id: &str,
        data: UpdateProdutoRequest,
    ) -> AppResult<Option<Produto>>;
    async fn delete_produto(&self, produto_id: &str) -> AppResult<Option<Produto>>;
}

pub struct OrmProdutoRepository {
    orm: OrmConn,
}

impl OrmProdutoRepository {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl ProdutoRepository for OrmProdutoRepository {
    async fn add_produto(&self, data: NovoProduto) -> AppResult<Produto> {
        let existente = Produtos::find()
            .filter(Column::NomeProduto.eq(&data.nome_produto))
            .one(&self.orm)
            .await?;
        if existente.is_some() {
            return Err(AppError::BadRequest(MSG_NOME_DUPLICADO.to_string()));
        }

        let active = ActiveModel {
            produto_id: Set(novo_id()),
            nome_produto: Set(data.nome_produto),
            descricao_produto: Set(data.descricao_produto),
            preco_produto: Set(data.preco_produto),
            categoria_produto: Set(data.categoria_produto),
        };
        match active.insert(&self.orm).await {
            Ok(produto) => Ok(produto_from_entity(produto)),
            // The unique index backs up the pre-check when two inserts race.
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::BadRequest(MSG_NOME_DUPLICADO.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_produto_by_produto_id(&self, produto_id: &str) -> AppResult<Option<Produto>> {
        let produto = Produtos::find_by_id(produto_id).one(&self.orm).await?;
        Ok(produto.map(produto_from_entity))
    }

    async fn get_all_produtos(&self) -> AppResult<Vec<Produto>> {
        let produtos = Produtos::find().all(&self.orm).await?;
        Ok(produtos.into_iter().map(produto_from_entity).collect())
    }

    async fn get_produtos_by_categoria(&self, categoria: &str) -> AppResult<Vec<Produto>> {
        let produtos = Produtos::find()
            .filter(Column::CategoriaProduto.eq(categoria))
            .all(&self.orm)
            .await?;
        Ok(produtos.into_iter().map(produto_from_entity).collect())
    }

    async fn update_produto(
        &self,
        produto_id: &str,
        data: UpdateProdutoRequest,
    ) -> AppResult<Option<Produto>> {
        let existente = Produtos::find_by_id(produto_id).one(&self.orm).await?;
        let existente = match existente {
            Some(produto) => produto,
            None => return Ok(None),
        };

        let mut active: ActiveModel = existente.into();
        if let Some(nome) = data.nome_produto {
            active.nome_produto = Set(nome);
        }
        if let Some(descricao) = data.descricao_produto {
            active.descricao_produto = Set(descricao);
        }
        if let Some(preco) = data.preco_produto {
            active.preco_produto = Set(preco);
        }
        if let Some(categoria) = data.categoria_produto {
            active.categoria_produto = Set(categoria);
        }

        let produto = active.update(&self.orm).await?;
        Ok(Some(produto_from_entity(produto)))
    }

    async fn delete_produto(&self, produto_id: &str) -> AppResult<Option<Produto>> {
        let existente = Produtos::find_by_id(produto_id).one(&self.orm).await?;
        let existente = match existente {
            Some(produto) => produto,
            None => return Ok(None),
        };

        Produtos::delete_by_id(produto_id).exec(&self.orm).await?;
        Ok(Some(produto_from_entity(existente)))
    }
}

fn produto_from_entity(model: ProdutoModel) -> Produto {
    Produto {
        produto_id: model.produto_id,
        nome_produto: model.nome_produto,
        descricao_produto: model.descricao_produto,
        preco_produto: model.preco_produto,
        categoria_produto: model.categoria_produto,
    }
}
