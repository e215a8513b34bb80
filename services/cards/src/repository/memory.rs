//! In-memory card repository with call counters.

use super::CardRepository;
use crate::domain::Card;
use async_trait::async_trait;
use eazybank_core::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Cards keyed by id. Ids are assigned from 1 on insert.
#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    cards: RwLock<BTreeMap<i64, Card>>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryCardRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `delete_by_id` calls so far.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>> {
        Ok(self
            .cards
            .read()
            .await
            .values()
            .find(|c| c.mobile_number == mobile_number)
            .cloned())
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>> {
        Ok(self
            .cards
            .read()
            .await
            .values()
            .find(|c| c.card_number == card_number)
            .cloned())
    }

    async fn save(&self, mut card: Card) -> Result<Card> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut cards = self.cards.write().await;
        if card.card_id == 0 {
            card.card_id = cards.keys().next_back().map_or(1, |last| last + 1);
        }
        cards.insert(card.card_id, card.clone());
        Ok(card)
    }

    async fn delete_by_id(&self, card_id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.cards.write().await.remove(&card_id);
        Ok(())
    }
}
