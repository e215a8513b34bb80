//! Cards service binary.

use cards::repository::PostgresCardRepository;
use cards::{AppState, CardsService, Config, build_router};
use eazybank_postgres::PgHealthProbe;
use eazybank_runtime::{Application, telemetry};
use eazybank_web::handlers::Readiness;
use std::sync::Arc;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing("info,cards=debug,sqlx=warn");

    let config = Config::from_env();
    tracing::info!(postgres = %config.postgres.url, "Configuration loaded");

    let pool = eazybank_postgres::connect(&config.postgres).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        cards: Arc::new(CardsService::new(Arc::new(PostgresCardRepository::new(
            pool.clone(),
        )))),
        info: Arc::new(config.info.clone()),
        readiness: Readiness::new().with_probe(Arc::new(PgHealthProbe::new(pool))),
    };

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(address = %config.server.bind_address(), "Cards service listening");

    let (shutdown_tx, _) = broadcast::channel(1);
    Application::new(listener, build_router(state), shutdown_tx)
        .with_shutdown_timeout(config.server.shutdown_timeout())
        .run()
        .await?;

    Ok(())
}
