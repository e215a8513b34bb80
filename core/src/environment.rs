//! Injected dependencies that make services deterministic under test.
//!
//! Services never call `Utc::now()` or `rand` directly; they hold an
//! `Arc<dyn Clock>` and an `Arc<dyn NumberGenerator>` instead. Tests swap in
//! `FixedClock` and `SequentialNumberGenerator` from `eazybank-testing`.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Clock trait - abstracts time operations for testability.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of business numbers (account, card and loan numbers).
pub trait NumberGenerator: Send + Sync {
    /// Produce the next number.
    fn next_number(&self) -> i64;
}

/// Uniformly random numbers in `base..base + span`.
///
/// Account numbers use `RandomNumberGenerator::new(1_000_000_000, 900_000_000)`;
/// card and loan numbers use a base of `100_000_000_000`.
#[derive(Debug, Clone, Copy)]
pub struct RandomNumberGenerator {
    base: i64,
    span: i64,
}

impl RandomNumberGenerator {
    /// Create a generator over `base..base + span`.
    ///
    /// A non-positive span always yields `base`.
    #[must_use]
    pub const fn new(base: i64, span: i64) -> Self {
        Self { base, span }
    }
}

impl NumberGenerator for RandomNumberGenerator {
    fn next_number(&self) -> i64 {
        if self.span <= 0 {
            return self.base;
        }
        self.base + rand::thread_rng().gen_range(0..self.span)
    }
}
