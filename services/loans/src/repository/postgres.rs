//! `PostgreSQL` loan repository.

use super::LoanRepository;
use crate::domain::Loan;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eazybank_core::{Result, audit::Audit};
use eazybank_postgres::map_sqlx_error;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct LoanRow {
    loan_id: i64,
    mobile_number: String,
    loan_number: String,
    loan_type: String,
    total_loan: i32,
    amount_paid: i32,
    outstanding_amount: i32,
    created_at: DateTime<Utc>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
}

impl From<LoanRow> for Loan {
    fn from(row: LoanRow) -> Self {
        Self {
            loan_id: row.loan_id,
            mobile_number: row.mobile_number,
            loan_number: row.loan_number,
            loan_type: row.loan_type,
            total_loan: row.total_loan,
            amount_paid: row.amount_paid,
            outstanding_amount: row.outstanding_amount,
            audit: Audit {
                created_at: row.created_at,
                created_by: row.created_by,
                updated_at: row.updated_at,
                updated_by: row.updated_by,
            },
        }
    }
}

const COLUMNS: &str = "loan_id, mobile_number, loan_number, loan_type, total_loan, amount_paid, \
     outstanding_amount, created_at, created_by, updated_at, updated_by";

/// Loans in the `loans` table.
#[derive(Clone)]
pub struct PostgresLoanRepository {
    pool: PgPool,
}

impl PostgresLoanRepository {
    /// Use the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanRepository for PostgresLoanRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>> {
        let row: Option<LoanRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM loans WHERE mobile_number = $1"))
                .bind(mobile_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(row.map(Loan::from))
    }

    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>> {
        let row: Option<LoanRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM loans WHERE loan_number = $1"))
                .bind(loan_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(row.map(Loan::from))
    }

    async fn save(&self, loan: Loan) -> Result<Loan> {
        let row: LoanRow = if loan.loan_id == 0 {
            sqlx::query_as(&format!(
                "INSERT INTO loans (mobile_number, loan_number, loan_type, total_loan, amount_paid,
                                    outstanding_amount, created_at, created_by, updated_at, updated_by)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                 RETURNING {COLUMNS}"
            ))
            .bind(&loan.mobile_number)
            .bind(&loan.loan_number)
            .bind(&loan.loan_type)
            .bind(loan.total_loan)
            .bind(loan.amount_paid)
            .bind(loan.outstanding_amount)
            .bind(loan.audit.created_at)
            .bind(&loan.audit.created_by)
            .bind(loan.audit.updated_at)
            .bind(&loan.audit.updated_by)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_as(&format!(
                "UPDATE loans
                 SET mobile_number = $2, loan_number = $3, loan_type = $4, total_loan = $5,
                     amount_paid = $6, outstanding_amount = $7, updated_at = $8, updated_by = $9
                 WHERE loan_id = $1
                 RETURNING {COLUMNS}"
            ))
            .bind(loan.loan_id)
            .bind(&loan.mobile_number)
            .bind(&loan.loan_number)
            .bind(&loan.loan_type)
            .bind(loan.total_loan)
            .bind(loan.amount_paid)
            .bind(loan.outstanding_amount)
            .bind(loan.audit.updated_at)
            .bind(&loan.audit.updated_by)
            .fetch_one(&self.pool)
            .await
        }
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_by_id(&self, loan_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM loans WHERE loan_id = $1")
            .bind(loan_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
