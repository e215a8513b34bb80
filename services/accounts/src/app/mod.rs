//! Application services.

pub mod services;

pub use services::{AccountService, CustomerService};
