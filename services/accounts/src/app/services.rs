//! Account and customer operations.
//!
//! [`AccountService`] owns the customer/account CRUD and the communication
//! hand-off to the message service. [`CustomerService`] builds the
//! cross-service customer view.

use crate::clients::{CardsClient, LoansClient};
use crate::domain::{
    ACCOUNT_NUMBER_BASE, ACCOUNT_NUMBER_SPAN, ADDRESS, AUDITOR, Account, Customer, SAVINGS,
};
use crate::dto::{CustomerDetailsDto, CustomerDto};
use crate::mapper;
use crate::repository::{AccountRepository, CustomerRepository};
use eazybank_core::audit::Audit;
use eazybank_core::environment::{
    Clock, NumberGenerator, RandomNumberGenerator, SystemClock,
};
use eazybank_core::event::SerializedEvent;
use eazybank_core::event_bus::EventBus;
use eazybank_core::messages::AccountsMessage;
use eazybank_core::{Result, ServiceError};
use std::sync::Arc;
use tracing::{info, warn};

/// Customer and account operations.
pub struct AccountService {
    customers: Arc<dyn CustomerRepository>,
    accounts: Arc<dyn AccountRepository>,
    event_bus: Arc<dyn EventBus>,
    topic: String,
    clock: Arc<dyn Clock>,
    numbers: Arc<dyn NumberGenerator>,
}

impl AccountService {
    /// Create a service publishing new-account messages to `topic`.
    ///
    /// Uses the system clock and random account numbers; see
    /// [`Self::with_environment`] for tests.
    #[must_use]
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        accounts: Arc<dyn AccountRepository>,
        event_bus: Arc<dyn EventBus>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            customers,
            accounts,
            event_bus,
            topic: topic.into(),
            clock: Arc::new(SystemClock),
            numbers: Arc::new(RandomNumberGenerator::new(
                ACCOUNT_NUMBER_BASE,
                ACCOUNT_NUMBER_SPAN,
            )),
        }
    }

    /// Replace the clock and account number source.
    #[must_use]
    pub fn with_environment(
        mut self,
        clock: Arc<dyn Clock>,
        numbers: Arc<dyn NumberGenerator>,
    ) -> Self {
        self.clock = clock;
        self.numbers = numbers;
        self
    }

    /// Register a customer and open a savings account for them.
    ///
    /// The new-account message is published after both rows are stored. A
    /// publish failure is logged and counted; the account still exists.
    ///
    /// # Errors
    ///
    /// [`ServiceError::AlreadyExists`] if the mobile number is taken, or a
    /// repository error.
    pub async fn create_account(&self, dto: &CustomerDto, correlation_id: &str) -> Result<Account> {
        if self
            .customers
            .find_by_mobile_number(&dto.mobile_number)
            .await?
            .is_some()
        {
            return Err(ServiceError::customer_already_registered(&dto.mobile_number));
        }

        let customer = self
            .customers
            .save(Customer {
                customer_id: 0,
                name: dto.name.clone(),
                email: dto.email.clone(),
                mobile_number: dto.mobile_number.clone(),
                audit: Audit::created(self.clock.as_ref(), AUDITOR),
            })
            .await?;

        let account = self.accounts.insert(self.new_account(&customer)).await?;

        metrics::counter!("accounts_created_total").increment(1);
        info!(
            account_number = account.account_number,
            customer_id = customer.customer_id,
            "Account created"
        );

        self.send_communication(&account, &customer, correlation_id)
            .await;

        Ok(account)
    }

    /// Customer and account registered under `mobile_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if either record is missing.
    pub async fn fetch_account(&self, mobile_number: &str) -> Result<CustomerDto> {
        let (customer, account) = self.load(mobile_number).await?;
        Ok(mapper::to_customer_dto(&customer, &account))
    }

    /// Apply `dto` to the account it names and to the account's customer.
    ///
    /// Returns `false` without touching storage when `dto` carries no
    /// account.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the account or its customer is missing.
    pub async fn update_account(&self, dto: &CustomerDto) -> Result<bool> {
        let Some(accounts_dto) = &dto.accounts_dto else {
            return Ok(false);
        };

        let mut account = self
            .accounts
            .find_by_account_number(accounts_dto.account_number)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Account", "AccountNumber", accounts_dto.account_number)
            })?;
        mapper::apply_accounts_dto(accounts_dto, &mut account);
        account.audit.touch(self.clock.as_ref(), AUDITOR);
        let account = self.accounts.save(account).await?;

        let mut customer = self
            .customers
            .find_by_id(account.customer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", "CustomerId", account.customer_id))?;
        mapper::apply_customer_dto(dto, &mut customer);
        customer.audit.touch(self.clock.as_ref(), AUDITOR);
        self.customers.save(customer).await?;

        info!(account_number = account.account_number, "Account updated");
        Ok(true)
    }

    /// Delete the customer registered under `mobile_number` and their
    /// accounts.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if there is no such customer.
    pub async fn delete_account(&self, mobile_number: &str) -> Result<bool> {
        let customer = self.find_customer(mobile_number).await?;
        self.accounts
            .delete_by_customer_id(customer.customer_id)
            .await?;
        self.customers.delete_by_id(customer.customer_id).await?;

        info!(customer_id = customer.customer_id, "Customer and accounts deleted");
        Ok(true)
    }

    /// Mark the customer as notified about `account_number`.
    ///
    /// Idempotent: a repeated event leaves the switch on.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the account does not exist.
    pub async fn update_communication_status(&self, account_number: i64) -> Result<bool> {
        let mut account = self
            .accounts
            .find_by_account_number(account_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", "AccountNumber", account_number))?;

        account.communication_sw = true;
        account.audit.touch(self.clock.as_ref(), AUDITOR);
        self.accounts.save(account).await?;
        Ok(true)
    }

    async fn find_customer(&self, mobile_number: &str) -> Result<Customer> {
        self.customers
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", "mobileNumber", mobile_number))
    }

    async fn load(&self, mobile_number: &str) -> Result<(Customer, Account)> {
        let customer = self.find_customer(mobile_number).await?;
        let account = self
            .accounts
            .find_by_customer_id(customer.customer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", "customerId", customer.customer_id))?;
        Ok((customer, account))
    }

    fn new_account(&self, customer: &Customer) -> Account {
        Account {
            account_number: self.numbers.next_number(),
            customer_id: customer.customer_id,
            account_type: SAVINGS.to_string(),
            branch_address: ADDRESS.to_string(),
            communication_sw: false,
            audit: Audit::created(self.clock.as_ref(), AUDITOR),
        }
    }

    async fn send_communication(&self, account: &Account, customer: &Customer, correlation_id: &str) {
        let message = AccountsMessage {
            account_number: account.account_number,
            name: customer.name.clone(),
            email: customer.email.clone(),
            mobile_number: customer.mobile_number.clone(),
        };
        info!("Sending Communication request for the details: {message:?}");

        let sent = match SerializedEvent::from_event(&message) {
            Ok(event) => {
                let event = event
                    .with_key(account.account_number.to_string())
                    .with_correlation_id(correlation_id);
                match self.event_bus.publish(&self.topic, &event).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(topic = %self.topic, error = %e, "Failed to publish AccountsMessage");
                        false
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to serialize AccountsMessage");
                false
            }
        };

        if !sent {
            metrics::counter!("events_publish_failures_total", "topic" => self.topic.clone())
                .increment(1);
        }
        info!("Is the Communication request successfully triggered? : {sent}");
    }
}

/// Customer view aggregated across accounts, cards and loans.
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    accounts: Arc<dyn AccountRepository>,
    cards: Arc<dyn CardsClient>,
    loans: Arc<dyn LoansClient>,
}

impl CustomerService {
    /// Create the service.
    #[must_use]
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        accounts: Arc<dyn AccountRepository>,
        cards: Arc<dyn CardsClient>,
        loans: Arc<dyn LoansClient>,
    ) -> Self {
        Self {
            customers,
            accounts,
            cards,
            loans,
        }
    }

    /// Local account data plus the customer's card and loan, if any.
    ///
    /// The card and loan calls run concurrently and carry `correlation_id`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] for an unknown customer or account, and
    /// [`ServiceError::Downstream`] if either remote call fails with anything
    /// other than a 404.
    pub async fn fetch_customer_details(
        &self,
        mobile_number: &str,
        correlation_id: &str,
    ) -> Result<CustomerDetailsDto> {
        let customer = self
            .customers
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", "mobileNumber", mobile_number))?;
        let account = self
            .accounts
            .find_by_customer_id(customer.customer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", "customerId", customer.customer_id))?;

        let (card, loan) = tokio::join!(
            self.cards.fetch_card_details(correlation_id, mobile_number),
            self.loans.fetch_loan_details(correlation_id, mobile_number),
        );

        let mut details = mapper::to_customer_details_dto(&customer, &account);
        details.cards_dto = card?;
        details.loans_dto = loan?;
        Ok(details)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::dto::{AccountsDto, CardsDto, LoansDto};
    use crate::repository::{InMemoryAccountRepository, InMemoryCustomerRepository};
    use async_trait::async_trait;
    use eazybank_core::messages::ACCOUNTS_MESSAGE;
    use eazybank_testing::{InMemoryEventBus, SequentialNumberGenerator, test_clock};

    const TOPIC: &str = "send-communication";

    struct Fixture {
        customers: Arc<InMemoryCustomerRepository>,
        accounts: Arc<InMemoryAccountRepository>,
        bus: Arc<InMemoryEventBus>,
        service: AccountService,
    }

    fn fixture() -> Fixture {
        let customers = Arc::new(InMemoryCustomerRepository::new());
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let service = AccountService::new(customers.clone(), accounts.clone(), bus.clone(), TOPIC)
            .with_environment(
                Arc::new(test_clock()),
                Arc::new(SequentialNumberGenerator::starting_at(1_234_567_890)),
            );
        Fixture {
            customers,
            accounts,
            bus,
            service,
        }
    }

    fn customer_dto() -> CustomerDto {
        CustomerDto {
            name: "Madan Reddy".to_string(),
            email: "tutor@eazybytes.com".to_string(),
            mobile_number: "4354437687".to_string(),
            accounts_dto: None,
        }
    }

    #[tokio::test]
    async fn create_account_stores_both_rows_and_publishes() {
        let f = fixture();
        let account = f.service.create_account(&customer_dto(), "corr-1").await.unwrap();

        assert_eq!(account.account_number, 1_234_567_890);
        assert_eq!(account.account_type, SAVINGS);
        assert_eq!(account.branch_address, ADDRESS);
        assert!(!account.communication_sw);
        assert_eq!(account.audit.created_by, AUDITOR);

        let published = f.bus.published(TOPIC);
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].key.as_deref(), Some("1234567890"));
        assert_eq!(published[0].correlation_id.as_deref(), Some("corr-1"));
        let message: AccountsMessage = published[0].decode(ACCOUNTS_MESSAGE).unwrap();
        assert_eq!(message.mobile_number, "4354437687");
        assert_eq!(message.account_number, 1_234_567_890);
    }

    #[tokio::test]
    async fn duplicate_mobile_number_is_rejected_without_saving() {
        let f = fixture();
        f.service.create_account(&customer_dto(), "corr-1").await.unwrap();

        let err = f
            .service
            .create_account(&customer_dto(), "corr-2")
            .await
            .expect_err("duplicate");
        assert_eq!(
            err.to_string(),
            "Customer already registered with given mobile number 4354437687"
        );
        assert_eq!(f.customers.save_calls(), 1);
        assert_eq!(f.accounts.save_calls(), 1);
        assert_eq!(f.bus.published_count(), 1);
    }

    #[tokio::test]
    async fn colliding_account_number_leaves_the_existing_account_alone() {
        let f = fixture();
        f.accounts
            .save(Account {
                account_number: 1_234_567_890,
                customer_id: 99,
                account_type: SAVINGS.to_string(),
                branch_address: ADDRESS.to_string(),
                communication_sw: true,
                audit: Audit::created(&test_clock(), AUDITOR),
            })
            .await
            .unwrap();

        let err = f
            .service
            .create_account(&customer_dto(), "corr-1")
            .await
            .expect_err("number collision");
        assert_eq!(
            err.to_string(),
            "Account already registered with given accountNumber 1234567890"
        );

        let existing = f
            .accounts
            .find_by_account_number(1_234_567_890)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(existing.customer_id, 99);
        assert!(existing.communication_sw);
        assert_eq!(f.bus.published_count(), 0);
    }

    #[tokio::test]
    async fn publish_failure_does_not_fail_creation() {
        let f = fixture();
        f.bus.set_fail_publishes(true);

        let account = f.service.create_account(&customer_dto(), "corr-1").await;
        assert!(account.is_ok());
        assert_eq!(f.accounts.len().await, 1);
        assert_eq!(f.bus.published_count(), 0);
    }

    #[tokio::test]
    async fn fetch_account_merges_customer_and_account() {
        let f = fixture();
        f.service.create_account(&customer_dto(), "corr-1").await.unwrap();

        let dto = f.service.fetch_account("4354437687").await.unwrap();
        assert_eq!(dto.name, "Madan Reddy");
        let account = dto.accounts_dto.expect("account attached");
        assert_eq!(account.account_number, 1_234_567_890);
        assert_eq!(account.account_type, "Savings");
    }

    #[tokio::test]
    async fn fetch_unknown_customer_is_not_found() {
        let f = fixture();
        let err = f.service.fetch_account("9999999999").await.expect_err("missing");
        assert_eq!(
            err.to_string(),
            "Customer not found with the given input data mobileNumber : '9999999999'"
        );
    }

    #[tokio::test]
    async fn update_without_account_payload_is_a_no_op() {
        let f = fixture();
        f.service.create_account(&customer_dto(), "corr-1").await.unwrap();

        let updated = f.service.update_account(&customer_dto()).await.unwrap();
        assert!(!updated);
        assert_eq!(f.accounts.save_calls(), 1);
    }

    #[tokio::test]
    async fn update_rewrites_account_and_customer() {
        let f = fixture();
        f.service.create_account(&customer_dto(), "corr-1").await.unwrap();

        let dto = CustomerDto {
            name: "Madan R".to_string(),
            email: "madan@eazybytes.com".to_string(),
            mobile_number: "4354437688".to_string(),
            accounts_dto: Some(AccountsDto {
                account_number: 1_234_567_890,
                account_type: "Current".to_string(),
                branch_address: "1 Wall Street, New York".to_string(),
            }),
        };
        assert!(f.service.update_account(&dto).await.unwrap());

        let fetched = f.service.fetch_account("4354437688").await.unwrap();
        assert_eq!(fetched.name, "Madan R");
        assert_eq!(fetched.email, "madan@eazybytes.com");
        let account = fetched.accounts_dto.unwrap();
        assert_eq!(account.account_type, "Current");
        assert_eq!(account.branch_address, "1 Wall Street, New York");

        let stored = f.accounts.find_by_account_number(1_234_567_890).await.unwrap().unwrap();
        assert_eq!(stored.audit.updated_by.as_deref(), Some(AUDITOR));
    }

    #[tokio::test]
    async fn update_unknown_account_is_not_found() {
        let f = fixture();
        let dto = CustomerDto {
            accounts_dto: Some(AccountsDto {
                account_number: 1_111_111_111,
                account_type: "Savings".to_string(),
                branch_address: ADDRESS.to_string(),
            }),
            ..customer_dto()
        };
        let err = f.service.update_account(&dto).await.expect_err("missing");
        assert_eq!(
            err.to_string(),
            "Account not found with the given input data AccountNumber : '1111111111'"
        );
    }

    /// Stores a customer with no account, as left behind by a half-finished
    /// create or delete.
    async fn seed_customer_only(f: &Fixture) -> Customer {
        f.customers
            .save(Customer {
                customer_id: 0,
                name: "Madan Reddy".to_string(),
                email: "tutor@eazybytes.com".to_string(),
                mobile_number: "4354437687".to_string(),
                audit: Audit::created(&test_clock(), AUDITOR),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn update_with_missing_customer_is_not_found() {
        let f = fixture();
        f.accounts
            .save(Account {
                account_number: 1_555_555_555,
                customer_id: 77,
                account_type: SAVINGS.to_string(),
                branch_address: ADDRESS.to_string(),
                communication_sw: false,
                audit: Audit::created(&test_clock(), AUDITOR),
            })
            .await
            .unwrap();
        let dto = CustomerDto {
            accounts_dto: Some(AccountsDto {
                account_number: 1_555_555_555,
                account_type: SAVINGS.to_string(),
                branch_address: "1 Side Street".to_string(),
            }),
            ..customer_dto()
        };

        let err = f.service.update_account(&dto).await.expect_err("no customer");
        assert_eq!(
            err.to_string(),
            "Customer not found with the given input data CustomerId : '77'"
        );
        assert_eq!(f.customers.save_calls(), 0);
    }

    #[tokio::test]
    async fn fetch_customer_without_account_is_not_found() {
        let f = fixture();
        let customer = seed_customer_only(&f).await;

        let err = f.service.fetch_account("4354437687").await.expect_err("no account");
        assert_eq!(
            err.to_string(),
            format!(
                "Account not found with the given input data customerId : '{}'",
                customer.customer_id
            )
        );
    }

    #[tokio::test]
    async fn delete_removes_account_then_customer() {
        let f = fixture();
        f.service.create_account(&customer_dto(), "corr-1").await.unwrap();

        assert!(f.service.delete_account("4354437687").await.unwrap());
        assert!(f.accounts.is_empty().await);
        assert!(f.customers.is_empty().await);
        assert_eq!(f.accounts.delete_calls(), 1);
        assert_eq!(f.customers.delete_calls(), 1);
    }

    #[tokio::test]
    async fn delete_unknown_customer_is_not_found() {
        let f = fixture();
        let err = f.service.delete_account("4354437687").await.expect_err("missing");
        assert!(matches!(err, ServiceError::NotFound { resource: "Customer", .. }));
        assert_eq!(f.accounts.delete_calls(), 0);
    }

    #[tokio::test]
    async fn communication_status_is_switched_on() {
        let f = fixture();
        let account = f.service.create_account(&customer_dto(), "corr-1").await.unwrap();

        assert!(
            f.service
                .update_communication_status(account.account_number)
                .await
                .unwrap()
        );
        assert!(
            f.service
                .update_communication_status(account.account_number)
                .await
                .unwrap()
        );
        let stored = f
            .accounts
            .find_by_account_number(account.account_number)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.communication_sw);
    }

    #[tokio::test]
    async fn communication_status_for_unknown_account_is_not_found() {
        let f = fixture();
        let err = f
            .service
            .update_communication_status(42)
            .await
            .expect_err("missing");
        assert!(matches!(err, ServiceError::NotFound { resource: "Account", .. }));
    }

    struct StubCards(Option<CardsDto>);

    #[async_trait]
    impl CardsClient for StubCards {
        async fn fetch_card_details(&self, _: &str, _: &str) -> Result<Option<CardsDto>> {
            Ok(self.0.clone())
        }
    }

    struct StubLoans(Result<Option<LoansDto>>);

    #[async_trait]
    impl LoansClient for StubLoans {
        async fn fetch_loan_details(&self, _: &str, _: &str) -> Result<Option<LoansDto>> {
            match &self.0 {
                Ok(loan) => Ok(loan.clone()),
                Err(e) => Err(ServiceError::Downstream(e.to_string())),
            }
        }
    }

    fn card() -> CardsDto {
        CardsDto {
            mobile_number: "4354437687".to_string(),
            card_number: "100646930341".to_string(),
            card_type: "Credit Card".to_string(),
            total_limit: 100_000,
            amount_used: 0,
            available_amount: 100_000,
        }
    }

    #[tokio::test]
    async fn details_combine_local_and_remote_data() {
        let f = fixture();
        f.service.create_account(&customer_dto(), "corr-1").await.unwrap();
        let details_service = CustomerService::new(
            f.customers.clone(),
            f.accounts.clone(),
            Arc::new(StubCards(Some(card()))),
            Arc::new(StubLoans(Ok(None))),
        );

        let details = details_service
            .fetch_customer_details("4354437687", "corr-9")
            .await
            .unwrap();
        assert_eq!(details.name, "Madan Reddy");
        assert!(details.accounts_dto.is_some());
        assert_eq!(details.cards_dto, Some(card()));
        assert!(details.loans_dto.is_none());
    }

    #[tokio::test]
    async fn details_for_customer_without_account_is_not_found() {
        let f = fixture();
        let customer = seed_customer_only(&f).await;
        let details_service = CustomerService::new(
            f.customers.clone(),
            f.accounts.clone(),
            Arc::new(StubCards(Some(card()))),
            Arc::new(StubLoans(Ok(None))),
        );

        let err = details_service
            .fetch_customer_details("4354437687", "corr-9")
            .await
            .expect_err("no account");
        assert_eq!(
            err.to_string(),
            format!(
                "Account not found with the given input data customerId : '{}'",
                customer.customer_id
            )
        );
    }

    #[tokio::test]
    async fn details_fail_when_a_downstream_fails() {
        let f = fixture();
        f.service.create_account(&customer_dto(), "corr-1").await.unwrap();
        let details_service = CustomerService::new(
            f.customers.clone(),
            f.accounts.clone(),
            Arc::new(StubCards(None)),
            Arc::new(StubLoans(Err(ServiceError::Downstream("loans down".to_string())))),
        );

        let err = details_service
            .fetch_customer_details("4354437687", "corr-9")
            .await
            .expect_err("downstream failure");
        assert!(matches!(err, ServiceError::Downstream(_)));
    }
}
