use std::sync::Arc;

use axum::{Router, routing::get};

use pedidos_microservices::{
    clients::{HttpPeerServices, PagSeguroClient},
    config::PedidoConfig,
    db::{create_orm_conn, run_migrations},
    repository::{OrmPedidoRepository, PedidoRepository},
    routes::{self, doc, health},
    server,
    services::{pagamento_service::PagamentoService, pedido_service::PedidoService},
    state::PedidoState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    server::init_tracing();

    // Peer endpoints and the PagSeguro token are required; abort early
    // instead of failing on the first order.
    let config = PedidoConfig::from_env()?;
    let orm = create_orm_conn(&config.app.database_url).await?;
    run_migrations(&orm, "migrations/pedido").await?;

    let repo: Arc<dyn PedidoRepository> = Arc::new(OrmPedidoRepository::new(orm));
    let http = reqwest::Client::new();
    let peers = Arc::new(HttpPeerServices::new(http.clone(), &config));
    let gateway = Arc::new(PagSeguroClient::new(http, &config));

    let state = PedidoState {
        repo: repo.clone(),
        pedidos: Arc::new(PedidoService::new(repo.clone(), peers.clone())),
        pagamentos: Arc::new(PagamentoService::new(
            repo,
            peers,
            gateway,
            config.notification_url.clone(),
        )),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/pedido", routes::pedido::router())
        .nest("/api/pagamento", routes::pagamento::router())
        .nest("/api/webhook", routes::webhook::router())
        .with_state(state)
        .merge(doc::pedido_docs());

    server::serve(server::apply_middleware(app), &config.app).await
}
