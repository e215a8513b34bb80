//! Card operations.

use crate::domain::{
    AUDITOR, CARD_NUMBER_BASE, CARD_NUMBER_SPAN, CREDIT_CARD, Card, NEW_CARD_LIMIT,
};
use crate::dto::CardsDto;
use crate::mapper;
use crate::repository::CardRepository;
use eazybank_core::audit::Audit;
use eazybank_core::environment::{Clock, NumberGenerator, RandomNumberGenerator, SystemClock};
use eazybank_core::{Result, ServiceError};
use std::sync::Arc;
use tracing::info;

/// Issue, read, change and cancel cards.
pub struct CardsService {
    cards: Arc<dyn CardRepository>,
    clock: Arc<dyn Clock>,
    numbers: Arc<dyn NumberGenerator>,
}

impl CardsService {
    /// Service over `cards` with the system clock and random card numbers.
    #[must_use]
    pub fn new(cards: Arc<dyn CardRepository>) -> Self {
        Self {
            cards,
            clock: Arc::new(SystemClock),
            numbers: Arc::new(RandomNumberGenerator::new(CARD_NUMBER_BASE, CARD_NUMBER_SPAN)),
        }
    }

    /// Replace the clock and card number source.
    #[must_use]
    pub fn with_environment(mut self, clock: Arc<dyn Clock>, numbers: Arc<dyn NumberGenerator>) -> Self {
        self.clock = clock;
        self.numbers = numbers;
        self
    }

    /// Issue a credit card for `mobile_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::AlreadyExists`] if the number already has a card.
    pub async fn create_card(&self, mobile_number: &str) -> Result<Card> {
        if self
            .cards
            .find_by_mobile_number(mobile_number)
            .await?
            .is_some()
        {
            return Err(ServiceError::already_registered("Card", mobile_number));
        }

        let card = self
            .cards
            .save(Card {
                card_id: 0,
                mobile_number: mobile_number.to_string(),
                card_number: self.numbers.next_number().to_string(),
                card_type: CREDIT_CARD.to_string(),
                total_limit: NEW_CARD_LIMIT,
                amount_used: 0,
                available_amount: NEW_CARD_LIMIT,
                audit: Audit::created(self.clock.as_ref(), AUDITOR),
            })
            .await?;

        metrics::counter!("cards_created_total").increment(1);
        info!(card_number = %card.card_number, "Card created");
        Ok(card)
    }

    /// Card owned by `mobile_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if there is none.
    pub async fn fetch_card(&self, mobile_number: &str) -> Result<CardsDto> {
        let card = self.find(mobile_number).await?;
        Ok(mapper::to_cards_dto(&card))
    }

    /// Overwrite the card named by `dto.card_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the card number is unknown.
    pub async fn update_card(&self, dto: &CardsDto) -> Result<bool> {
        let mut card = self
            .cards
            .find_by_card_number(&dto.card_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Card", "CardNumber", &dto.card_number))?;

        mapper::apply_cards_dto(dto, &mut card);
        card.audit.touch(self.clock.as_ref(), AUDITOR);
        self.cards.save(card).await?;
        Ok(true)
    }

    /// Cancel the card owned by `mobile_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if there is none.
    pub async fn delete_card(&self, mobile_number: &str) -> Result<bool> {
        let card = self.find(mobile_number).await?;
        self.cards.delete_by_id(card.card_id).await?;
        info!(card_number = %card.card_number, "Card deleted");
        Ok(true)
    }

    async fn find(&self, mobile_number: &str) -> Result<Card> {
        self.cards
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Card", "mobileNumber", mobile_number))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCardRepository;
    use eazybank_testing::{SequentialNumberGenerator, test_clock};

    fn service() -> (Arc<InMemoryCardRepository>, CardsService) {
        let repo = Arc::new(InMemoryCardRepository::new());
        let service = CardsService::new(repo.clone()).with_environment(
            Arc::new(test_clock()),
            Arc::new(SequentialNumberGenerator::starting_at(100_646_930_341)),
        );
        (repo, service)
    }

    #[tokio::test]
    async fn create_issues_a_default_credit_card() {
        let (repo, service) = service();

        let card = service.create_card("3809678512").await.unwrap();
        assert_eq!(card.card_number, "100646930341");
        assert_eq!(card.card_type, CREDIT_CARD);
        assert_eq!(card.total_limit, 100_000);
        assert_eq!(card.amount_used, 0);
        assert_eq!(card.available_amount, 100_000);
        assert_eq!(card.audit.created_by, "CARDS_MS");
        assert_eq!(repo.save_calls(), 1);
    }

    #[tokio::test]
    async fn create_when_card_exists_never_saves() {
        let (repo, service) = service();
        service.create_card("3809678512").await.unwrap();

        let err = service.create_card("3809678512").await.expect_err("duplicate");
        assert_eq!(
            err.to_string(),
            "Card already registered with given mobileNumber 3809678512"
        );
        assert_eq!(repo.save_calls(), 1);
    }

    #[tokio::test]
    async fn fetch_maps_the_stored_card() {
        let (_, service) = service();
        service.create_card("3809678512").await.unwrap();

        let dto = service.fetch_card("3809678512").await.unwrap();
        assert_eq!(dto.mobile_number, "3809678512");
        assert_eq!(dto.card_number, "100646930341");
    }

    #[tokio::test]
    async fn fetch_unknown_is_not_found() {
        let (_, service) = service();
        let err = service.fetch_card("3809678512").await.expect_err("missing");
        assert_eq!(
            err.to_string(),
            "Card not found with the given input data mobileNumber : '3809678512'"
        );
    }

    #[tokio::test]
    async fn update_overwrites_amounts() {
        let (repo, service) = service();
        service.create_card("3809678512").await.unwrap();

        let dto = CardsDto {
            mobile_number: "3809678512".to_string(),
            card_number: "100646930341".to_string(),
            card_type: CREDIT_CARD.to_string(),
            total_limit: 100_000,
            amount_used: 2_500,
            available_amount: 97_500,
        };
        assert!(service.update_card(&dto).await.unwrap());
        assert_eq!(service.fetch_card("3809678512").await.unwrap(), dto);
        assert_eq!(repo.save_calls(), 2);

        let stored = repo.find_by_card_number("100646930341").await.unwrap().unwrap();
        assert_eq!(stored.audit.updated_by.as_deref(), Some("CARDS_MS"));
    }

    #[tokio::test]
    async fn update_unknown_card_is_not_found() {
        let (repo, service) = service();
        let dto = CardsDto {
            mobile_number: "3809678512".to_string(),
            card_number: "999999999999".to_string(),
            card_type: CREDIT_CARD.to_string(),
            total_limit: 1,
            amount_used: 0,
            available_amount: 1,
        };
        let err = service.update_card(&dto).await.expect_err("missing");
        assert_eq!(
            err.to_string(),
            "Card not found with the given input data CardNumber : '999999999999'"
        );
        assert_eq!(repo.save_calls(), 0);
    }

    #[tokio::test]
    async fn delete_removes_the_card() {
        let (repo, service) = service();
        service.create_card("3809678512").await.unwrap();

        assert!(service.delete_card("3809678512").await.unwrap());
        assert_eq!(repo.delete_calls(), 1);
        assert!(service.fetch_card("3809678512").await.is_err());
    }
}
