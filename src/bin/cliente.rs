use std::sync::Arc;

use axum::{Router, routing::get};

use pedidos_microservices::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    repository::OrmClienteRepository,
    routes::{self, doc, health},
    server,
    state::ClienteState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    server::init_tracing();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm, "migrations/cliente").await?;

    let state = ClienteState {
        repo: Arc::new(OrmClienteRepository::new(orm)),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/cliente", routes::cliente::router())
        .with_state(state)
        .merge(doc::cliente_docs());

    server::serve(server::apply_middleware(app), &config).await
}
