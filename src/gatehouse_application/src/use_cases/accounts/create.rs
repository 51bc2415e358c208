use gatehouse_core::{
    Account, AccountStore, Clock, CredentialHasher, Email, Password, ProfileUpdate,
};

use crate::AccountLifecycleError;

#[derive(Debug)]
pub struct NewAccount {
    pub email: Email,
    pub password: Password,
    pub profile: ProfileUpdate,
}

/// Create account use case - adds an account on behalf of an administrator
///
/// Unlike registration no code is issued and nothing is mailed; the owner
/// can ask for an activation code later.
pub struct CreateAccountUseCase<S, H, C>
where
    S: AccountStore,
    H: CredentialHasher,
    C: Clock,
{
    account_store: S,
    hasher: H,
    clock: C,
}

impl<S, H, C> CreateAccountUseCase<S, H, C>
where
    S: AccountStore,
    H: CredentialHasher,
    C: Clock,
{
    pub fn new(account_store: S, hasher: H, clock: C) -> Self {
        Self {
            account_store,
            hasher,
            clock,
        }
    }

    #[tracing::instrument(name = "CreateAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, new_account: NewAccount) -> Result<Account, AccountLifecycleError> {
        let NewAccount {
            email,
            password,
            profile,
        } = new_account;

        if self.account_store.find_by_email(&email).await?.is_some() {
            return Err(AccountLifecycleError::Conflict);
        }

        let credential_hash = self.hasher.hash(&password).await?;
        let mut account = Account::new(email, None, credential_hash, None, self.clock.now());
        account.apply_profile_update(profile);

        let account = self.account_store.insert(account).await?;
        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }
}
