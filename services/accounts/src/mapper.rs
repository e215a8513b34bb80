//! Field copies between entities and DTOs.

use crate::domain::{Account, Customer};
use crate::dto::{AccountsDto, CustomerDetailsDto, CustomerDto};

/// Account entity to its DTO.
#[must_use]
pub fn to_accounts_dto(account: &Account) -> AccountsDto {
    AccountsDto {
        account_number: account.account_number,
        account_type: account.account_type.clone(),
        branch_address: account.branch_address.clone(),
    }
}

/// Copy the mutable DTO fields onto an account.
pub fn apply_accounts_dto(dto: &AccountsDto, account: &mut Account) {
    account.account_type.clone_from(&dto.account_type);
    account.branch_address.clone_from(&dto.branch_address);
}

/// Customer entity plus its account to a [`CustomerDto`].
#[must_use]
pub fn to_customer_dto(customer: &Customer, account: &Account) -> CustomerDto {
    CustomerDto {
        name: customer.name.clone(),
        email: customer.email.clone(),
        mobile_number: customer.mobile_number.clone(),
        accounts_dto: Some(to_accounts_dto(account)),
    }
}

/// Copy name, email and mobile number onto a customer.
pub fn apply_customer_dto(dto: &CustomerDto, customer: &mut Customer) {
    customer.name.clone_from(&dto.name);
    customer.email.clone_from(&dto.email);
    customer.mobile_number.clone_from(&dto.mobile_number);
}

/// Start a details view with the local data; cards and loans are filled in
/// by the caller.
#[must_use]
pub fn to_customer_details_dto(customer: &Customer, account: &Account) -> CustomerDetailsDto {
    CustomerDetailsDto {
        name: customer.name.clone(),
        email: customer.email.clone(),
        mobile_number: customer.mobile_number.clone(),
        accounts_dto: Some(to_accounts_dto(account)),
        cards_dto: None,
        loans_dto: None,
    }
}
