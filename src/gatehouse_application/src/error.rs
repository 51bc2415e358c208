use gatehouse_core::{AccountStoreError, HasherError, NotificationError};

/// Failure kinds shared by all account use cases.
#[derive(Debug, thiserror::Error)]
pub enum AccountLifecycleError {
    #[error("An account with this email already exists")]
    Conflict,
    #[error("Account not found")]
    NotFound,
    #[error("Account is already activated")]
    AlreadyActivated,
    #[error("Account is not activated")]
    NotActivated,
    #[error("Code is invalid or has expired")]
    InvalidOrExpiredCode,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Dependency failure: {0}")]
    DependencyFailure(String),
}

impl From<AccountStoreError> for AccountLifecycleError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountAlreadyExists => AccountLifecycleError::Conflict,
            AccountStoreError::AccountNotFound => AccountLifecycleError::NotFound,
            AccountStoreError::UnexpectedError(e) => AccountLifecycleError::DependencyFailure(e),
        }
    }
}

impl From<HasherError> for AccountLifecycleError {
    fn from(error: HasherError) -> Self {
        AccountLifecycleError::DependencyFailure(error.to_string())
    }
}

impl From<NotificationError> for AccountLifecycleError {
    fn from(error: NotificationError) -> Self {
        AccountLifecycleError::DependencyFailure(error.to_string())
    }
}
