//! Accounts service binary.
//!
//! ```bash
//! docker compose up -d
//! cargo run -p accounts
//! ```

use accounts::clients::{HttpCardsClient, HttpLoansClient};
use accounts::functions::CommunicationSentHandler;
use accounts::repository::{PostgresAccountRepository, PostgresCustomerRepository};
use accounts::{AccountService, AppState, Config, CustomerService, build_router};
use eazybank_core::event_bus::EventBus;
use eazybank_postgres::PgHealthProbe;
use eazybank_redpanda::RedpandaEventBus;
use eazybank_runtime::{Application, EventConsumer, telemetry};
use eazybank_web::handlers::health::Readiness;
use std::sync::Arc;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing("info,accounts=debug,sqlx=warn");

    let config = Config::from_env();
    tracing::info!(
        postgres = %config.postgres.url,
        redpanda = %config.redpanda.brokers,
        cards = %config.cards_service_url,
        loans = %config.loans_service_url,
        "Configuration loaded"
    );

    let pool = eazybank_postgres::connect(&config.postgres).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    let event_bus: Arc<dyn EventBus> = Arc::new(RedpandaEventBus::from_config(&config.redpanda)?);

    let customers = Arc::new(PostgresCustomerRepository::new(pool.clone()));
    let accounts = Arc::new(PostgresAccountRepository::new(pool.clone()));
    let account_service = Arc::new(AccountService::new(
        customers.clone(),
        accounts.clone(),
        event_bus.clone(),
        config.redpanda.send_communication_topic.clone(),
    ));

    let http = reqwest::Client::new();
    let customer_service = Arc::new(CustomerService::new(
        customers,
        accounts,
        Arc::new(HttpCardsClient::new(http.clone(), &config.cards_service_url)),
        Arc::new(HttpLoansClient::new(http, &config.loans_service_url)),
    ));

    let state = AppState {
        accounts: account_service.clone(),
        customers: customer_service,
        info: Arc::new(config.info.clone()),
        readiness: Readiness::new().with_probe(Arc::new(PgHealthProbe::new(pool))),
    };

    let (shutdown_tx, _) = broadcast::channel(1);
    let consumer = EventConsumer::new(
        "communication-sent",
        vec![config.redpanda.communication_sent_topic.clone()],
        event_bus,
        Arc::new(CommunicationSentHandler::new(account_service)),
        shutdown_tx.subscribe(),
    );

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(address = %config.server.bind_address(), "Accounts service listening");

    Application::new(listener, build_router(state), shutdown_tx)
        .with_consumer(consumer)
        .with_shutdown_timeout(config.server.shutdown_timeout())
        .run()
        .await?;

    Ok(())
}
