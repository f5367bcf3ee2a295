//! Outbound HTTP: lookups against the cliente/produto peer services and the
//! PagSeguro orders API. Both sit behind traits so the orchestration
//! services can be exercised with fakes.

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::{
    config::PedidoConfig,
    dto::pagamento::{GatewayOrderRequest, GatewayOrderResponse},
    error::{AppError, AppResult},
    models::{Cliente, Produto},
};

/// Synchronous lookups against the peer microservices.
#[async_trait]
pub trait PeerServices: Send + Sync {
    async fn get_cliente(&self, cliente_id: &str) -> AppResult<Option<Cliente>>;
    async fn get_produto(&self, produto_id: &str) -> AppResult<Option<Produto>>;
}

pub struct HttpPeerServices {
    http: reqwest::Client,
    cliente_endpoint: String,
    produto_endpoint: String,
}

impl HttpPeerServices {
    pub fn new(http: reqwest::Client, config: &PedidoConfig) -> Self {
        Self {
            http,
            cliente_endpoint: config.cliente_endpoint.clone(),
            produto_endpoint: config.produto_endpoint.clone(),
        }
    }
}

#[async_trait]
impl PeerServices for HttpPeerServices {
    async fn get_cliente(&self, cliente_id: &str) -> AppResult<Option<Cliente>> {
        let url = format!("http://{}/api/cliente/{}", self.cliente_endpoint, cliente_id);
        fetch_opcional(&self.http, &url, "clientes").await
    }

    async fn get_produto(&self, produto_id: &str) -> AppResult<Option<Produto>> {
        let url = format!("http://{}/api/produto/{}", self.produto_endpoint, produto_id);
        fetch_opcional(&self.http, &url, "produtos").await
    }
}

/// GET returning `None` on 404; any other non-2xx answer is an upstream
/// failure carrying the peer's status.
async fn fetch_opcional<T: serde::de::DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    servico: &str,
) -> AppResult<Option<T>> {
    let response = http.get(url).send().await?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !response.status().is_success() {
        let status = response.status().as_u16();
        tracing::error!(%url, status, "erro ao consultar serviço de {servico}");
        return Err(AppError::Upstream {
            status,
            message: format!("Erro ao consultar serviço de {servico}: {status}"),
        });
    }
    Ok(Some(response.json::<T>().await?))
}

/// The external payment gateway, at the boundary this system uses.
#[async_trait]
pub trait PagamentoGateway: Send + Sync {
    async fn criar_pagamento(&self, body: &GatewayOrderRequest) -> AppResult<GatewayOrderResponse>;
}

pub struct PagSeguroClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PagSeguroClient {
    pub fn new(http: reqwest::Client, config: &PedidoConfig) -> Self {
        Self {
            http,
            base_url: config.pagseguro_base_url.clone(),
            token: config.pagseguro_token.clone(),
        }
    }
}

#[async_trait]
impl PagamentoGateway for PagSeguroClient {
    async fn criar_pagamento(&self, body: &GatewayOrderRequest) -> AppResult<GatewayOrderResponse> {
        let url = format!("{}/orders", self.base_url);
        tracing::info!(%url, "enviando requisição para o PagSeguro");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.token.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detalhe = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %detalhe, "erro HTTP do PagSeguro");
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("gateway error: {}", status.as_u16()),
            });
        }

        let parsed = response.json::<GatewayOrderResponse>().await.map_err(|err| {
            tracing::error!(error = %err, "resposta do PagSeguro fora do formato esperado");
            AppError::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: "Resposta inesperada do gateway de pagamento".to_string(),
            }
        })?;
        Ok(parsed)
    }
}
