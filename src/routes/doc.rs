use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cliente::CreateClienteRequest,
        pedido::{
            CreatePedidoRequest, ItemPedidoRequest, UpdateStatusRequest, WebhookData,
            WebhookNotification,
        },
        produto::{CreateProdutoRequest, UpdateProdutoRequest},
    },
    models::{Cliente, ItemPedido, Pagamento, Pedido, Produto},
    routes::{cliente, health, health::HealthData, pagamento, pedido, produto, webhook},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cliente::registrar_cliente,
        cliente::buscar_cliente,
        cliente::listar_clientes,
    ),
    components(schemas(HealthData, Cliente, CreateClienteRequest)),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Cliente", description = "Cadastro e consulta de clientes"),
    )
)]
pub struct ClienteApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        produto::criar_produtos,
        produto::listar_produtos,
        produto::buscar_produto,
        produto::listar_por_categoria,
        produto::atualizar_produto,
        produto::excluir_produto,
    ),
    components(schemas(HealthData, Produto, CreateProdutoRequest, UpdateProdutoRequest)),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Produto", description = "Catálogo de produtos"),
    )
)]
pub struct ProdutoApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        pedido::criar_pedido,
        pedido::listar_pedidos,
        pedido::listar_pedidos_ativos,
        pedido::buscar_pedido,
        pedido::atualizar_status,
        pagamento::criar_pagamento,
        webhook::receber_notificacao,
    ),
    components(schemas(
        HealthData,
        Pedido,
        ItemPedido,
        Pagamento,
        CreatePedidoRequest,
        ItemPedidoRequest,
        UpdateStatusRequest,
        WebhookNotification,
        WebhookData,
    )),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Pedido", description = "Criação e acompanhamento de pedidos"),
        (name = "Pagamento", description = "Início de pagamento via PagSeguro"),
        (name = "Webhook", description = "Notificações do gateway"),
    )
)]
pub struct PedidoApiDoc;

pub fn cliente_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ClienteApiDoc::openapi())
}

pub fn produto_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ProdutoApiDoc::openapi())
}

pub fn pedido_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", PedidoApiDoc::openapi())
}
