//! Application services.

pub mod services;

pub use services::CardsService;
