use std::sync::Arc;

use axum::{Router, routing::get};

use pedidos_microservices::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    repository::OrmProdutoRepository,
    routes::{self, doc, health},
    server,
    state::ProdutoState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    server::init_tracing();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm, "migrations/produto").await?;

    let state = ProdutoState {
        repo: Arc::new(OrmProdutoRepository::new(orm)),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/produto", routes::produto::router())
        .with_state(state)
        .merge(doc::produto_docs());

    server::serve(server::apply_middleware(app), &config).await
}
