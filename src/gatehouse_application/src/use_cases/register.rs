use gatehouse_core::{
    Account, AccountId, AccountStore, Clock, CredentialHasher, Email, Notification,
    NotificationSender, Password, PendingCode,
};

use crate::{AccountLifecycleError, LifecyclePolicy};

/// Register use case - creates an inactive account and mails its activation code
pub struct RegisterUseCase<S, H, N, C>
where
    S: AccountStore,
    H: CredentialHasher,
    N: NotificationSender,
    C: Clock,
{
    account_store: S,
    hasher: H,
    notifier: N,
    clock: C,
    policy: LifecyclePolicy,
}

impl<S, H, N, C> RegisterUseCase<S, H, N, C>
where
    S: AccountStore,
    H: CredentialHasher,
    N: NotificationSender,
    C: Clock,
{
    pub fn new(
        account_store: S,
        hasher: H,
        notifier: N,
        clock: C,
        policy: LifecyclePolicy,
    ) -> Self {
        Self {
            account_store,
            hasher,
            notifier,
            clock,
            policy,
        }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `email` - Validated email address, must not belong to another account
    /// * `display_name` - Optional free-text name
    /// * `password` - The account's initial password
    ///
    /// # Returns
    /// The new account's id. If the activation mail cannot be sent the account
    /// stays persisted and `DependencyFailure` is returned; the owner recovers
    /// by asking for a new activation code.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        display_name: Option<String>,
        password: Password,
    ) -> Result<AccountId, AccountLifecycleError> {
        if self.account_store.find_by_email(&email).await?.is_some() {
            return Err(AccountLifecycleError::Conflict);
        }

        let credential_hash = self.hasher.hash(&password).await?;

        let now = self.clock.now();
        let pending_code = PendingCode::issue(now, self.policy.code_ttl);
        let notification = Notification::Activation {
            display_name: display_name.clone(),
            code: pending_code.code.clone(),
            expires_at: pending_code.expires_at,
        };

        let account = Account::new(
            email,
            display_name,
            credential_hash,
            Some(pending_code),
            now,
        );
        let account = self.account_store.insert(account).await?;
        tracing::info!(account_id = %account.id, "Account registered");

        if let Err(e) = self.notifier.send(&account.email, &notification).await {
            tracing::warn!(account_id = %account.id, error = %e, "Activation notification failed");
            return Err(e.into());
        }

        Ok(account.id)
    }
}
