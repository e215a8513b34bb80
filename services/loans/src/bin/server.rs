//! Loans service binary.
//!
//! Listens on `PORT` (default 8090) and applies its migrations on start.

use eazybank_postgres::PgHealthProbe;
use eazybank_runtime::{Application, telemetry};
use eazybank_web::handlers::Readiness;
use loans::repository::PostgresLoanRepository;
use loans::{AppState, Config, LoansService, build_router};
use std::sync::Arc;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing("info,loans=debug,sqlx=warn");

    let config = Config::from_env();
    let pool = eazybank_postgres::connect(&config.postgres).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Loans schema up to date");

    let repository = Arc::new(PostgresLoanRepository::new(pool.clone()));
    let readiness = Readiness::new().with_probe(Arc::new(PgHealthProbe::new(pool)));
    let router = build_router(AppState {
        loans: Arc::new(LoansService::new(repository)),
        info: Arc::new(config.info),
        readiness,
    });

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "Loans service listening");

    let (shutdown_tx, _) = broadcast::channel(1);
    Application::new(listener, router, shutdown_tx)
        .with_shutdown_timeout(config.server.shutdown_timeout())
        .run()
        .await?;

    Ok(())
}
