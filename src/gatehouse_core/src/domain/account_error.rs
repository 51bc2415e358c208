use thiserror::Error;

/// Errors raised while parsing account input into domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("Invalid account id")]
    InvalidAccountId,
    #[error("Invalid code")]
    InvalidCode,
}
