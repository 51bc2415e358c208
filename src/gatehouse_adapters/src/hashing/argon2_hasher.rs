use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use gatehouse_core::{CredentialHash, CredentialHasher, HasherError, Password};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hasher. The work runs on the blocking pool so request tasks are
/// never stalled by it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, HasherError> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| HasherError(e.to_string()))?,
    ))
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<CredentialHash, HasherError> {
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| CredentialHash::new(Secret::new(h.to_string())))
                    .map_err(|e| HasherError(e.to_string()))
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        password: &Password,
        hash: &CredentialHash,
    ) -> Result<bool, HasherError> {
        let password = password.clone();
        let expected = hash.as_ref().clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(expected.expose_secret())
                    .map_err(|e| HasherError(e.to_string()))?;

                match argon2()?
                    .verify_password(password.as_ref().expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(HasherError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?
    }
}
