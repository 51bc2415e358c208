use gatehouse_core::{
    AccountId, AccountStore, Clock, Email, Notification, NotificationSender, PendingCode,
};

use crate::{AccountLifecycleError, LifecyclePolicy};

/// Reissue activation code use case - replaces the pending code of an inactive account
pub struct ReissueActivationCodeUseCase<S, N, C>
where
    S: AccountStore,
    N: NotificationSender,
    C: Clock,
{
    account_store: S,
    notifier: N,
    clock: C,
    policy: LifecyclePolicy,
}

impl<S, N, C> ReissueActivationCodeUseCase<S, N, C>
where
    S: AccountStore,
    N: NotificationSender,
    C: Clock,
{
    pub fn new(account_store: S, notifier: N, clock: C, policy: LifecyclePolicy) -> Self {
        Self {
            account_store,
            notifier,
            clock,
            policy,
        }
    }

    #[tracing::instrument(name = "ReissueActivationCodeUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<AccountId, AccountLifecycleError> {
        let account = self
            .account_store
            .find_by_email(&email)
            .await?
            .ok_or(AccountLifecycleError::NotFound)?;

        if account.is_active {
            return Err(AccountLifecycleError::AlreadyActivated);
        }

        let pending_code = PendingCode::issue(self.clock.now(), self.policy.code_ttl);
        let notification = Notification::Activation {
            display_name: account.display_name.clone(),
            code: pending_code.code.clone(),
            expires_at: pending_code.expires_at,
        };

        self.account_store
            .set_pending_code(&account.id, pending_code)
            .await?;
        self.notifier.send(&account.email, &notification).await?;

        tracing::info!(account_id = %account.id, "Activation code reissued");
        Ok(account.id)
    }
}
