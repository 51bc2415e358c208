use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    account::{
        Account, CodeConsumption, CodeLookup, CodeValidationOutcome, PendingCode, ProfileUpdate,
    },
    account_id::AccountId,
    activation_code::ActivationCode,
    email::Email,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists)
                | (Self::AccountNotFound, Self::AccountNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;
    /// Persists a new account. Email uniqueness is enforced here.
    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError>;
    /// Replaces any outstanding code; activation state is left alone.
    async fn set_pending_code(
        &self,
        id: &AccountId,
        pending_code: PendingCode,
    ) -> Result<(), AccountStoreError>;
    async fn update_profile(
        &self,
        id: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, AccountStoreError>;
    /// Atomically validates `code` for the looked-up account and, if it is
    /// accepted at `now`, applies `consumption` and clears the code.
    async fn consume_code(
        &self,
        lookup: CodeLookup,
        code: &ActivationCode,
        now: DateTime<Utc>,
        consumption: CodeConsumption,
    ) -> Result<CodeValidationOutcome, AccountStoreError>;
    /// Accounts ordered by creation time.
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Account>, AccountStoreError>;
    async fn count(&self) -> Result<u64, AccountStoreError>;
    async fn delete(&self, id: &AccountId) -> Result<(), AccountStoreError>;
}
