use gatehouse_core::{
    AccountId, AccountStore, Clock, Email, Notification, NotificationSender, PendingCode,
};

use crate::{AccountLifecycleError, LifecyclePolicy};

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordResetRequested {
    pub account_id: AccountId,
    pub email: Email,
}

/// Request password reset use case - mails a reset code to an activated account
pub struct RequestPasswordResetUseCase<S, N, C>
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

impl<S, N, C> RequestPasswordResetUseCase<S, N, C>
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

    /// Only activated accounts may reset their password.
    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        email: Email,
    ) -> Result<PasswordResetRequested, AccountLifecycleError> {
        let account = self
            .account_store
            .find_by_email(&email)
            .await?
            .ok_or(AccountLifecycleError::NotFound)?;

        if !account.is_active {
            return Err(AccountLifecycleError::NotActivated);
        }

        let pending_code = PendingCode::issue(self.clock.now(), self.policy.code_ttl);
        let notification = Notification::PasswordReset {
            display_name: account.display_name.clone(),
            code: pending_code.code.clone(),
            expires_at: pending_code.expires_at,
        };

        self.account_store
            .set_pending_code(&account.id, pending_code)
            .await?;
        self.notifier.send(&account.email, &notification).await?;

        tracing::info!(account_id = %account.id, "Password reset requested");
        Ok(PasswordResetRequested {
            account_id: account.id,
            email: account.email,
        })
    }
}
