//! EazyBank loans service.
//!
//! Every customer (keyed by mobile number) may hold a single home loan; the
//! accounts service reads it through `GET /api/fetch`.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod dto;
pub mod mapper;
pub mod repository;
pub mod server;

pub use app::LoansService;
pub use config::Config;
pub use server::{AppState, build_router};
