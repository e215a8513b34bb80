//! Card storage.

pub mod memory;
pub mod postgres;

use crate::domain::Card;
use async_trait::async_trait;
use eazybank_core::Result;

pub use memory::InMemoryCardRepository;
pub use postgres::PostgresCardRepository;

/// Card storage.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Card owned by `mobile_number`.
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>>;

    /// Card with the given number.
    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>>;

    /// Insert when `card_id` is 0, otherwise update.
    async fn save(&self, card: Card) -> Result<Card>;

    /// Remove a card. Missing ids are ignored.
    async fn delete_by_id(&self, card_id: i64) -> Result<()>;
}
