//! HTTP handlers under `/api`.

pub mod cards;
