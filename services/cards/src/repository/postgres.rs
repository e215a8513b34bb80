//! `PostgreSQL` card repository.

use super::CardRepository;
use crate::domain::Card;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eazybank_core::{Result, audit::Audit};
use eazybank_postgres::map_sqlx_error;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct CardRow {
    card_id: i64,
    mobile_number: String,
    card_number: String,
    card_type: String,
    total_limit: i32,
    amount_used: i32,
    available_amount: i32,
    created_at: DateTime<Utc>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Self {
            card_id: row.card_id,
            mobile_number: row.mobile_number,
            card_number: row.card_number,
            card_type: row.card_type,
            total_limit: row.total_limit,
            amount_used: row.amount_used,
            available_amount: row.available_amount,
            audit: Audit {
                created_at: row.created_at,
                created_by: row.created_by,
                updated_at: row.updated_at,
                updated_by: row.updated_by,
            },
        }
    }
}

const COLUMNS: &str = "card_id, mobile_number, card_number, card_type, total_limit, amount_used, \
     available_amount, created_at, created_by, updated_at, updated_by";

/// Cards in the `cards` table.
#[derive(Clone)]
pub struct PostgresCardRepository {
    pool: PgPool,
}

impl PostgresCardRepository {
    /// Use the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for PostgresCardRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>> {
        let row: Option<CardRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM cards WHERE mobile_number = $1"))
                .bind(mobile_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(row.map(Card::from))
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>> {
        let row: Option<CardRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM cards WHERE card_number = $1"))
                .bind(card_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(row.map(Card::from))
    }

    async fn save(&self, card: Card) -> Result<Card> {
        let row: CardRow = if card.card_id == 0 {
            sqlx::query_as(&format!(
                "INSERT INTO cards (mobile_number, card_number, card_type, total_limit, amount_used,
                                    available_amount, created_at, created_by, updated_at, updated_by)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                 RETURNING {COLUMNS}"
            ))
            .bind(&card.mobile_number)
            .bind(&card.card_number)
            .bind(&card.card_type)
            .bind(card.total_limit)
            .bind(card.amount_used)
            .bind(card.available_amount)
            .bind(card.audit.created_at)
            .bind(&card.audit.created_by)
            .bind(card.audit.updated_at)
            .bind(&card.audit.updated_by)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_as(&format!(
                "UPDATE cards
                 SET mobile_number = $2, card_number = $3, card_type = $4, total_limit = $5,
                     amount_used = $6, available_amount = $7, updated_at = $8, updated_by = $9
                 WHERE card_id = $1
                 RETURNING {COLUMNS}"
            ))
            .bind(card.card_id)
            .bind(&card.mobile_number)
            .bind(&card.card_number)
            .bind(&card.card_type)
            .bind(card.total_limit)
            .bind(card.amount_used)
            .bind(card.available_amount)
            .bind(card.audit.updated_at)
            .bind(&card.audit.updated_by)
            .fetch_one(&self.pool)
            .await
        }
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_by_id(&self, card_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM cards WHERE card_id = $1")
            .bind(card_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
