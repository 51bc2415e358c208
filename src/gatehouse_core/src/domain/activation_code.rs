use rand::{Rng, distr::Alphanumeric};

use super::account_error::AccountError;

const CODE_LENGTH: usize = 32;

/// Opaque one-time code mailed to the account owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCode(String);

impl ActivationCode {
    /// Generates a fresh random code.
    pub fn new() -> Self {
        let code = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect();
        Self(code)
    }

    pub fn parse(raw: String) -> Result<Self, AccountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccountError::InvalidCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActivationCode {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for ActivationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
