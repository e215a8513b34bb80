//! Runtime pieces shared by the EazyBank service binaries.
//!
//! - [`EventConsumer`]: subscribe, hand each event to an [`EventHandler`],
//!   reconnect when the stream ends, stop on shutdown
//! - [`Application`]: run the HTTP server and the consumers, then shut both
//!   down when the process receives Ctrl+C or SIGTERM
//! - [`telemetry::init_tracing`]: install the `tracing` subscriber

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod consumer;
pub mod handlers;
pub mod lifecycle;
pub mod telemetry;

pub use consumer::EventConsumer;
pub use handlers::{EventHandler, HandlerError};
pub use lifecycle::Application;
