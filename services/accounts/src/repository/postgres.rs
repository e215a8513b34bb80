//! `PostgreSQL` repositories.

use super::{AccountRepository, CustomerRepository, account_number_taken};
use crate::domain::{Account, Customer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eazybank_core::{Result, audit::Audit};
use eazybank_postgres::map_sqlx_error;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct CustomerRow {
    customer_id: i64,
    name: String,
    email: String,
    mobile_number: String,
    created_at: DateTime<Utc>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            customer_id: row.customer_id,
            name: row.name,
            email: row.email,
            mobile_number: row.mobile_number,
            audit: Audit {
                created_at: row.created_at,
                created_by: row.created_by,
                updated_at: row.updated_at,
                updated_by: row.updated_by,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_number: i64,
    customer_id: i64,
    account_type: String,
    branch_address: String,
    communication_sw: bool,
    created_at: DateTime<Utc>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            account_number: row.account_number,
            customer_id: row.customer_id,
            account_type: row.account_type,
            branch_address: row.branch_address,
            communication_sw: row.communication_sw,
            audit: Audit {
                created_at: row.created_at,
                created_by: row.created_by,
                updated_at: row.updated_at,
                updated_by: row.updated_by,
            },
        }
    }
}

const CUSTOMER_COLUMNS: &str =
    "customer_id, name, email, mobile_number, created_at, created_by, updated_at, updated_by";

const ACCOUNT_COLUMNS: &str = "account_number, customer_id, account_type, branch_address, \
     communication_sw, created_at, created_by, updated_at, updated_by";

/// Customers in the `customer` table.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Use the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE mobile_number = $1"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_id(&self, customer_id: i64) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(Customer::from))
    }

    async fn save(&self, customer: Customer) -> Result<Customer> {
        let row: CustomerRow = if customer.customer_id == 0 {
            sqlx::query_as(&format!(
                "INSERT INTO customer (name, email, mobile_number, created_at, created_by, updated_at, updated_by)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING {CUSTOMER_COLUMNS}"
            ))
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.mobile_number)
            .bind(customer.audit.created_at)
            .bind(&customer.audit.created_by)
            .bind(customer.audit.updated_at)
            .bind(&customer.audit.updated_by)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_as(&format!(
                "UPDATE customer
                 SET name = $2, email = $3, mobile_number = $4, updated_at = $5, updated_by = $6
                 WHERE customer_id = $1
                 RETURNING {CUSTOMER_COLUMNS}"
            ))
            .bind(customer.customer_id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.mobile_number)
            .bind(customer.audit.updated_at)
            .bind(&customer.audit.updated_by)
            .fetch_one(&self.pool)
            .await
        }
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_by_id(&self, customer_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM customer WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// Accounts in the `accounts` table.
#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Use the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE customer_id = $1
             ORDER BY account_number LIMIT 1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(Account::from))
    }

    async fn find_by_account_number(&self, account_number: i64) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_number = $1"
        ))
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(Account::from))
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "INSERT INTO accounts ({ACCOUNT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (account_number) DO NOTHING
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(account.account_number)
        .bind(account.customer_id)
        .bind(&account.account_type)
        .bind(&account.branch_address)
        .bind(account.communication_sw)
        .bind(account.audit.created_at)
        .bind(&account.audit.created_by)
        .bind(account.audit.updated_at)
        .bind(&account.audit.updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Account::from)
            .ok_or_else(|| account_number_taken(account.account_number))
    }

    async fn save(&self, account: Account) -> Result<Account> {
        let row: AccountRow = sqlx::query_as(&format!(
            "INSERT INTO accounts ({ACCOUNT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (account_number) DO UPDATE SET
                 customer_id = EXCLUDED.customer_id,
                 account_type = EXCLUDED.account_type,
                 branch_address = EXCLUDED.branch_address,
                 communication_sw = EXCLUDED.communication_sw,
                 updated_at = EXCLUDED.updated_at,
                 updated_by = EXCLUDED.updated_by
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(account.account_number)
        .bind(account.customer_id)
        .bind(&account.account_type)
        .bind(&account.branch_address)
        .bind(account.communication_sw)
        .bind(account.audit.created_at)
        .bind(&account.audit.created_by)
        .bind(account.audit.updated_at)
        .bind(&account.audit.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_by_customer_id(&self, customer_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM accounts WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
