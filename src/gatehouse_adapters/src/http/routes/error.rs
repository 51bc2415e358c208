use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_application::AccountLifecycleError;
use gatehouse_core::AccountError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::TokenAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AccountApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("An account with this email already exists")]
    Conflict,

    #[error("Account is already activated")]
    AlreadyActivated,

    #[error("Account not found")]
    NotFound,

    #[error("Account is not activated")]
    NotActivated,

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AccountApiError::InvalidInput(_) | AccountApiError::PasswordMismatch => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            AccountApiError::Conflict | AccountApiError::AlreadyActivated => {
                (StatusCode::CONFLICT, self.to_string())
            }

            AccountApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),

            AccountApiError::NotActivated => (StatusCode::FORBIDDEN, self.to_string()),

            AccountApiError::AuthenticationError(_) => (StatusCode::UNAUTHORIZED, self.to_string()),

            AccountApiError::UnexpectedError(ref e) => {
                tracing::error!(error = %e, "Request failed on a dependency");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<AccountError> for AccountApiError {
    fn from(error: AccountError) -> Self {
        AccountApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountLifecycleError> for AccountApiError {
    fn from(error: AccountLifecycleError) -> Self {
        match error {
            AccountLifecycleError::Conflict => AccountApiError::Conflict,
            AccountLifecycleError::NotFound => AccountApiError::NotFound,
            AccountLifecycleError::AlreadyActivated => AccountApiError::AlreadyActivated,
            AccountLifecycleError::NotActivated => AccountApiError::NotActivated,
            AccountLifecycleError::PasswordMismatch => AccountApiError::PasswordMismatch,
            AccountLifecycleError::InvalidOrExpiredCode
            | AccountLifecycleError::InvalidCredentials => {
                AccountApiError::AuthenticationError(error.to_string())
            }
            AccountLifecycleError::DependencyFailure(e) => AccountApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenAuthError> for AccountApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken
            | TokenAuthError::InvalidToken
            | TokenAuthError::TokenError(_) => {
                AccountApiError::AuthenticationError(error.to_string())
            }
            TokenAuthError::UnexpectedError(e) => AccountApiError::UnexpectedError(e),
        }
    }
}
