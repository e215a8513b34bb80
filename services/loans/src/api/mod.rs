//! HTTP handlers under `/api`.

pub mod loans;
