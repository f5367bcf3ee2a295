use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, SecondsFormat, Utc};

use crate::{
    clients::{PagamentoGateway, PeerServices},
    dto::pagamento::{
        GatewayAddress, GatewayAmount, GatewayCustomer, GatewayItem, GatewayOrderRequest,
        GatewayPhone, GatewayQrCodeRequest, GatewayShipping,
    },
    error::{AppError, AppResult},
    models::{Cliente, ItemPedido, Pagamento, Pedido},
    repository::PedidoRepository,
};

/// Payment-initiation workflow: load the order, re-resolve customer and
/// products, submit a PagSeguro order and record the payment status. The
/// only durable side effect is the order's statusPagamento field.
pub struct PagamentoService {
    repo: Arc<dyn PedidoRepository>,
    peers: Arc<dyn PeerServices>,
    gateway: Arc<dyn PagamentoGateway>,
    notification_url: String,
}

impl PagamentoService {
    pub fn new(
        repo: Arc<dyn PedidoRepository>,
        peers: Arc<dyn PeerServices>,
        gateway: Arc<dyn PagamentoGateway>,
        notification_url: String,
    ) -> Self {
        Self {
            repo,
            peers,
            gateway,
            notification_url,
        }
    }

    pub async fn criar_pagamento(&self, pedido_id: &str) -> AppResult<Pagamento> {
        let pedido = self
            .repo
            .get_pedido_by_pedido_id(pedido_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado".to_string()))?;

        let cliente_id = pedido
            .cliente
            .as_deref()
            .ok_or_else(|| AppError::NotFound("Cliente não encontrado".to_string()))?;
        let cliente = self
            .peers
            .get_cliente(cliente_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente não encontrado".to_string()))?;
        tracing::debug!(cliente_id = %cliente.cliente_id, "cliente recebido da API");

        let items = self.construir_produtos(&pedido.produtos).await?;
        let body = montar_request_body(&pedido, &cliente, items, &self.notification_url);
        tracing::debug!(reference_id = %body.reference_id, "payload enviado ao PagSeguro");

        let resposta = self.gateway.criar_pagamento(&body).await?;
        let qr_code_link = resposta
            .qr_codes
            .first()
            .and_then(|qr| qr.links.get(1))
            .map(|link| link.href.clone())
            .ok_or_else(|| AppError::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: "Resposta inesperada do gateway de pagamento".to_string(),
            })?;

        self.repo
            .update_status_pagamento(pedido_id, "Aprovado")
            .await?;

        Ok(Pagamento {
            pedido_id: pedido_id.to_string(),
            valor: pedido.total,
            status: "Pendente".to_string(),
            qr_code_link,
        })
    }

    /// Re-fetches every product for current name/price rather than reusing
    /// the denormalized order lines.
    async fn construir_produtos(&self, itens: &[ItemPedido]) -> AppResult<Vec<GatewayItem>> {
        let mut items = Vec::with_capacity(itens.len());
        for item in itens {
            let produto = self
                .peers
                .get_produto(&item.produto)
                .await?
                .ok_or_else(|| AppError::NotFound("Produto não encontrado".to_string()))?;
            items.push(GatewayItem {
                name: produto.nome_produto,
                quantity: item.quantidade,
                unit_amount: para_centavos(produto.preco_produto),
            });
        }
        Ok(items)
    }
}

pub fn para_centavos(valor: f64) -> i64 {
    (valor * 100.0).round() as i64
}

/// Maps the gateway's transaction status onto the local vocabulary; unknown
/// statuses are stored verbatim.
pub fn mapear_status_pagamento(status: &str) -> &str {
    if status == "PAID" { "Aprovado" } else { status }
}

pub fn montar_request_body(
    pedido: &Pedido,
    cliente: &Cliente,
    items: Vec<GatewayItem>,
    notification_url: &str,
) -> GatewayOrderRequest {
    let expiration = (Utc::now() + Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Millis, true);
    GatewayOrderRequest {
        reference_id: pedido.pedido_id.clone(),
        customer: GatewayCustomer {
            name: cliente.nome_cliente.clone(),
            email: cliente.email.clone(),
            tax_id: cliente.cpf.clone(),
            phones: vec![GatewayPhone {
                country: "55".to_string(),
                area: "41".to_string(),
                number: "999999999".to_string(),
                kind: "MOBILE".to_string(),
            }],
        },
        items,
        qr_codes: vec![GatewayQrCodeRequest {
            amount: GatewayAmount {
                value: para_centavos(pedido.total),
            },
            expiration_date: expiration,
        }],
        shipping: GatewayShipping {
            address: GatewayAddress {
                street: "meu endereço".to_string(),
                number: "0000".to_string(),
                complement: "loja 01".to_string(),
                locality: "Meu bairro".to_string(),
                city: "Curitiba".to_string(),
                region_code: "PR".to_string(),
                country: "BRA".to_string(),
                postal_code: "80000000".to_string(),
            },
        },
        notification_urls: vec![notification_url.to_string()],
    }
}
