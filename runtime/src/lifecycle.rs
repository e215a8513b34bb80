//! Application lifecycle and graceful shutdown.
//!
//! When Ctrl+C or SIGTERM arrives:
//! 1. The HTTP server stops accepting new connections and drains in-flight ones
//! 2. The shutdown signal is broadcast to every consumer
//! 3. Each consumer gets `shutdown_timeout` to finish its current event
//!
//! ```rust,ignore
//! let (shutdown_tx, _) = broadcast::channel(1);
//! let consumer = EventConsumer::new("communication-sent", topics, bus, handler, shutdown_tx.subscribe());
//!
//! Application::new(listener, router, shutdown_tx)
//!     .with_consumer(consumer)
//!     .run()
//!     .await?;
//! ```

use crate::EventConsumer;
use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// A service process: one HTTP server plus background consumers.
pub struct Application {
    /// TCP listener for HTTP server
    listener: tokio::net::TcpListener,

    /// Axum router with all HTTP routes
    app: axum::Router,

    /// Event consumers
    consumers: Vec<EventConsumer>,

    /// Shutdown signal broadcaster
    shutdown_tx: broadcast::Sender<()>,

    /// How long each consumer gets to stop
    shutdown_timeout: Duration,
}

impl Application {
    /// Create an application with no consumers and a 10 second shutdown timeout.
    #[must_use]
    pub fn new(
        listener: tokio::net::TcpListener,
        app: axum::Router,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            listener,
            app,
            consumers: Vec::new(),
            shutdown_tx,
            shutdown_timeout: Duration::from_secs(10),
        }
    }

    /// Add a background consumer.
    #[must_use]
    pub fn with_consumer(mut self, consumer: EventConsumer) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Set how long each consumer gets to stop.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Run until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP server fails.
    pub async fn run(self) -> Result<(), std::io::Error> {
        self.run_until(shutdown_signal()).await
    }

    /// Run until `signal` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP server fails.
    pub async fn run_until<F>(self, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(address) = self.listener.local_addr() {
            info!(address = %address, "Starting HTTP server");
        }

        info!(consumer_count = self.consumers.len(), "Starting event consumers");
        let consumer_handles: Vec<_> = self
            .consumers
            .into_iter()
            .map(|consumer| {
                let name = consumer.name().to_string();
                (name, consumer.spawn())
            })
            .collect();

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(signal)
            .await?;

        info!("HTTP server stopped, initiating graceful shutdown...");

        // No receivers left is fine: every consumer has already exited.
        let _ = self.shutdown_tx.send(());

        Self::await_shutdown(consumer_handles, self.shutdown_timeout).await;

        info!("Graceful shutdown complete");
        Ok(())
    }

    async fn await_shutdown(
        consumer_handles: Vec<(String, tokio::task::JoinHandle<()>)>,
        timeout: Duration,
    ) {
        for (name, handle) in consumer_handles {
            match tokio::time::timeout(timeout, handle).await {
                Ok(Ok(())) => info!(consumer = %name, "Consumer stopped gracefully"),
                Ok(Err(e)) => warn!(consumer = %name, error = %e, "Consumer task failed"),
                Err(_) => warn!(consumer = %name, "Consumer shutdown timed out"),
            }
        }
    }
}

/// Wait for Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed, that signal is logged and ignored.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        () = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::{EventHandler, HandlerError};
    use async_trait::async_trait;
    use axum::routing::get;
    use eazybank_core::event::SerializedEvent;
    use eazybank_testing::InMemoryEventBus;
    use std::sync::Arc;

    struct Noop;

    #[async_trait]
    impl EventHandler for Noop {
        async fn handle(&self, _event: &SerializedEvent) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn stops_server_and_consumers_on_signal() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let router = axum::Router::new().route("/health", get(|| async { "ok" }));
        let (shutdown_tx, _) = broadcast::channel(1);
        let consumer = EventConsumer::new(
            "noop",
            vec!["topic".to_string()],
            Arc::new(InMemoryEventBus::new()),
            Arc::new(Noop),
            shutdown_tx.subscribe(),
        );

        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let app = Application::new(listener, router, shutdown_tx)
            .with_consumer(consumer)
            .with_shutdown_timeout(Duration::from_secs(1));
        let running = tokio::spawn(app.run_until(async {
            let _ = stop_rx.await;
        }));

        tokio::time::sleep(Duration::from_millis(50)).await;
        stop_tx.send(()).expect("app is running");

        tokio::time::timeout(Duration::from_secs(3), running)
            .await
            .expect("app stops")
            .expect("task did not panic")
            .expect("server ran cleanly");
    }
}
