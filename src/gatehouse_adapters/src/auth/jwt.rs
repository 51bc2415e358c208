use chrono::Utc;
use gatehouse_core::Account;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TOKEN_TYPE: &str = "Bearer";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    /// Token lifetime in seconds.
    pub time_to_live: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Issues and validates HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn issue(&self, account: &Account) -> Result<IssuedToken, TokenAuthError> {
        let ttl = self.config.time_to_live;
        let delta = chrono::Duration::try_seconds(ttl).ok_or(
            TokenAuthError::UnexpectedError("Failed to create auth token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenAuthError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        // Claims carry exp as usize
        let exp: usize = exp.try_into().map_err(|_| {
            TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string())
        })?;

        let claims = Claims {
            sub: account.id.to_string(),
            email: account.email.as_ref().expose_secret().clone(),
            exp,
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(TokenAuthError::TokenError)?;

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: ttl,
        })
    }

    /// Checks signature and expiry and returns the embedded claims.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenAuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(TokenAuthError::TokenError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::{CredentialHash, Email};

    fn issuer(time_to_live: i64) -> JwtTokenIssuer {
        JwtTokenIssuer::new(JwtConfig {
            secret: Secret::new("test-secret".to_owned()),
            time_to_live,
        })
    }

    fn account() -> Account {
        Account::new(
            Email::parse("ann@example.com").unwrap(),
            Some("Ann".to_owned()),
            CredentialHash::new(Secret::new("hash".to_owned())),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_issue_then_validate() {
        let issuer = issuer(600);
        let account = account();

        let token = issuer.issue(&account).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 600);

        let claims = issuer.validate(&token.access_token).unwrap();
        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, "ann@example.com");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default 60s leeway
        let issuer = issuer(-120);
        let token = issuer.issue(&account()).unwrap();

        assert!(matches!(
            issuer.validate(&token.access_token),
            Err(TokenAuthError::TokenError(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(issuer(600).validate("not.a.token").is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = issuer(600).issue(&account()).unwrap();
        let other = JwtTokenIssuer::new(JwtConfig {
            secret: Secret::new("another-secret".to_owned()),
            time_to_live: 600,
        });

        assert!(other.validate(&token.access_token).is_err());
    }
}
