use gatehouse_core::{Account, AccountStore, CredentialHasher, Email, Password};

use crate::{AccountLifecycleError, LifecyclePolicy};

/// Login use case - validates credentials
pub struct LoginUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    account_store: S,
    hasher: H,
    policy: LifecyclePolicy,
}

impl<S, H> LoginUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    pub fn new(account_store: S, hasher: H, policy: LifecyclePolicy) -> Self {
        Self {
            account_store,
            hasher,
            policy,
        }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// The authenticated account. Unknown emails and wrong passwords both fail
    /// with `InvalidCredentials`. Inactive accounts fail with `NotActivated`
    /// unless the policy lets them through, in which case the caller sees
    /// `is_active == false` on the returned account.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<Account, AccountLifecycleError> {
        let account = self
            .account_store
            .find_by_email(&email)
            .await?
            .ok_or(AccountLifecycleError::InvalidCredentials)?;

        if !self
            .hasher
            .verify(&password, &account.credential_hash)
            .await?
        {
            return Err(AccountLifecycleError::InvalidCredentials);
        }

        if !account.is_active && self.policy.require_activation_for_login {
            return Err(AccountLifecycleError::NotActivated);
        }

        Ok(account)
    }
}
