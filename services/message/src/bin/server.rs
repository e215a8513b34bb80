//! Message service binary.

use eazybank_core::event_bus::EventBus;
use eazybank_redpanda::RedpandaEventBus;
use eazybank_runtime::{Application, EventConsumer, telemetry};
use message::{AccountsMessageHandler, Config, build_router};
use std::sync::Arc;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing("info,message=debug");

    let config = Config::from_env();
    tracing::info!(
        redpanda = %config.redpanda.brokers,
        consumes = %config.redpanda.send_communication_topic,
        publishes = %config.redpanda.communication_sent_topic,
        "Configuration loaded"
    );

    let event_bus: Arc<dyn EventBus> = Arc::new(RedpandaEventBus::from_config(&config.redpanda)?);
    let handler = AccountsMessageHandler::new(
        event_bus.clone(),
        config.redpanda.communication_sent_topic.clone(),
    );

    let (shutdown_tx, _) = broadcast::channel(1);
    let consumer = EventConsumer::new(
        "send-communication",
        vec![config.redpanda.send_communication_topic.clone()],
        event_bus,
        Arc::new(handler),
        shutdown_tx.subscribe(),
    );

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    Application::new(listener, build_router(), shutdown_tx)
        .with_consumer(consumer)
        .with_shutdown_timeout(config.server.shutdown_timeout())
        .run()
        .await?;

    Ok(())
}
