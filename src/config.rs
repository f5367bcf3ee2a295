use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL não configurada")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            port,
            database_url,
            host,
        })
    }
}

/// Extra configuration required by the pedido/pagamento service: peer
/// endpoints and the PagSeguro credentials. Missing values abort startup.
#[derive(Debug, Clone)]
pub struct PedidoConfig {
    pub app: AppConfig,
    /// host[:port] of the cliente service load balancer, called over http.
    pub cliente_endpoint: String,
    /// host[:port] of the produto service load balancer, called over http.
    pub produto_endpoint: String,
    pub pagseguro_token: String,
    pub pagseguro_base_url: String,
    pub notification_url: String,
}

impl PedidoConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let app = AppConfig::from_env()?;
        let cliente_endpoint =
            env::var("CLIENTE_ENDPOINT").context("CLIENTE_ENDPOINT não configurado")?;
        let produto_endpoint =
            env::var("PRODUTO_ENDPOINT").context("PRODUTO_ENDPOINT não configurado")?;
        let pagseguro_token = env::var("PAGSEGURO_TOKEN").context(
            "O token do PagSeguro não foi configurado. Defina a variável de ambiente PAGSEGURO_TOKEN.",
        )?;
        let pagseguro_base_url = env::var("PAGSEGURO_BASE_URL")
            .unwrap_or_else(|_| "https://sandbox.api.pagseguro.com".to_string());
        let notification_url = env::var("NOTIFICATION_URL")
            .unwrap_or_else(|_| "https://meusite.com/notificacoes".to_string());
        Ok(Self {
            app,
            cliente_endpoint,
            produto_endpoint,
            pagseguro_token,
            pagseguro_base_url,
            notification_url,
        })
    }
}
