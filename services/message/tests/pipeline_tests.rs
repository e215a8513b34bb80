//! The handler driven by a real `EventConsumer` over the in-memory bus.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use eazybank_core::event::SerializedEvent;
use eazybank_core::event_bus::EventBus;
use eazybank_core::messages::{AccountsMessage, COMMUNICATION_SENT, CommunicationSent};
use eazybank_runtime::EventConsumer;
use eazybank_testing::InMemoryEventBus;
use message::{AccountsMessageHandler, build_router};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower::ServiceExt;

#[tokio::test]
async fn new_account_message_is_answered() {
    let bus = Arc::new(InMemoryEventBus::new());
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let consumer = EventConsumer::new(
        "send-communication",
        vec!["send-communication".to_string()],
        bus.clone(),
        Arc::new(AccountsMessageHandler::new(bus.clone(), "communication-sent")),
        shutdown_rx,
    )
    .with_retry_delay(Duration::from_millis(10))
    .spawn();

    // Wait for the subscription before publishing.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let message = AccountsMessage {
        account_number: 1_987_654_321,
        name: "Madan Reddy".to_string(),
        email: "tutor@eazybytes.com".to_string(),
        mobile_number: "4354437687".to_string(),
    };
    let event = SerializedEvent::from_event(&message)
        .unwrap()
        .with_key("1987654321")
        .with_correlation_id("pipeline-1");
    bus.publish("send-communication", &event).await.unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while bus.published("communication-sent").is_empty() {
        assert!(tokio::time::Instant::now() < deadline, "no reply published");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let reply = &bus.published("communication-sent")[0];
    let sent: CommunicationSent = reply.decode(COMMUNICATION_SENT).unwrap();
    assert_eq!(sent.account_number, 1_987_654_321);
    assert_eq!(reply.correlation_id.as_deref(), Some("pipeline-1"));

    shutdown_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(1), consumer)
        .await
        .expect("consumer stops")
        .unwrap();
}

#[tokio::test]
async fn health_endpoints_answer() {
    let response = build_router()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ready"], true);
}
