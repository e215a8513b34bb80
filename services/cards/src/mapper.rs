//! Field copies between [`Card`] and [`CardsDto`].

use crate::domain::Card;
use crate::dto::CardsDto;

/// Card entity to its DTO.
#[must_use]
pub fn to_cards_dto(card: &Card) -> CardsDto {
    CardsDto {
        mobile_number: card.mobile_number.clone(),
        card_number: card.card_number.clone(),
        card_type: card.card_type.clone(),
        total_limit: card.total_limit,
        amount_used: card.amount_used,
        available_amount: card.available_amount,
    }
}

/// Copy every DTO field onto a card.
pub fn apply_cards_dto(dto: &CardsDto, card: &mut Card) {
    card.mobile_number.clone_from(&dto.mobile_number);
    card.card_number.clone_from(&dto.card_number);
    card.card_type.clone_from(&dto.card_type);
    card.total_limit = dto.total_limit;
    card.amount_used = dto.amount_used;
    card.available_amount = dto.available_amount;
}
