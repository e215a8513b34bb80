//! EazyBank accounts service.
//!
//! Owns customers and their accounts. After an account is created it
//! publishes an [`AccountsMessage`](eazybank_core::messages::AccountsMessage)
//! for the message service and, when the matching
//! [`CommunicationSent`](eazybank_core::messages::CommunicationSent) comes
//! back, flips the account's communication switch.
//!
//! ```text
//! HTTP ──► api ──► AccountService ──► repositories ──► PostgreSQL
//!                       │
//!                       └─► EventBus (send-communication)
//!
//! EventConsumer (communication-sent) ──► CommunicationSentHandler
//!
//! /fetchCustomerDetails ──► CustomerService ──┬─► cards  (HTTP)
//!                                             └─► loans  (HTTP)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod domain;
pub mod dto;
pub mod functions;
pub mod mapper;
pub mod repository;
pub mod server;

pub use app::{AccountService, CustomerService};
pub use config::Config;
pub use server::{AppState, build_router};
