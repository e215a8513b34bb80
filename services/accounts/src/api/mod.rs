//! HTTP handlers under `/api`.

pub mod accounts;
pub mod customers;
