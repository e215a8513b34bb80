//! Handlers shared by every service.

pub mod health;
pub mod info;

pub use health::{Readiness, health_check, readiness_check};
pub use info::{build_info, contact_info};
