//! Application services.

pub mod services;

pub use services::LoansService;
