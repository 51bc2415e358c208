use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use gatehouse_core::AccountId;

use super::jwt::{JwtTokenIssuer, TokenAuthError};
use crate::http::AccountApiError;

/// The caller identified by a valid `Authorization: Bearer` token.
#[derive(Debug, Clone)]
pub struct BearerAccount {
    pub account_id: AccountId,
    pub email: String,
}

impl<St> FromRequestParts<St> for BearerAccount
where
    JwtTokenIssuer: FromRef<St>,
    St: Send + Sync,
{
    type Rejection = AccountApiError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        let issuer = JwtTokenIssuer::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(TokenAuthError::MissingToken)?
            .to_str()
            .map_err(|_| TokenAuthError::InvalidToken)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenAuthError::InvalidToken)?;

        let claims = issuer.validate(token)?;
        let account_id =
            AccountId::parse(&claims.sub).map_err(|_| TokenAuthError::InvalidToken)?;

        Ok(BearerAccount {
            account_id,
            email: claims.email,
        })
    }
}
