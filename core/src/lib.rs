//! # EazyBank Core
//!
//! Core traits and types shared by the EazyBank services.
//!
//! Every service in the workspace (accounts, cards, loans, message) is built
//! from the same small set of pieces:
//!
//! - **Events**: [`event::Event`] and the [`event::SerializedEvent`] wire format
//! - **Event bus**: the [`event_bus::EventBus`] trait, implemented by Redpanda in
//!   production and by an in-memory bus in tests
//! - **Errors**: [`error::ServiceError`], raised by service operations
//! - **Validation**: field checks for incoming DTOs ([`validation`])
//! - **Environment**: injected clock and number generators ([`environment`])
//! - **Audit**: created/updated stamps carried by every entity ([`audit`])
//!
//! ## Request flow
//!
//! ```text
//! HTTP handler ──► service ──► repository trait ──► Postgres
//!                     │
//!                     └──► EventBus::publish ──► Redpanda ──► consumer
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod config;
pub mod environment;
pub mod error;
pub mod event;
pub mod event_bus;
pub mod health;
pub mod messages;
pub mod validation;

pub use error::{Result, ServiceError};
