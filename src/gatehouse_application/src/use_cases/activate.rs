use gatehouse_core::{
    AccountId, AccountStore, ActivationCode, Clock, CodeConsumption, CodeLookup,
    CodeValidationOutcome,
};

use crate::AccountLifecycleError;

/// Activate use case - consumes an activation code and activates the account
pub struct ActivateUseCase<S, C>
where
    S: AccountStore,
    C: Clock,
{
    account_store: S,
    clock: C,
}

impl<S, C> ActivateUseCase<S, C>
where
    S: AccountStore,
    C: Clock,
{
    pub fn new(account_store: S, clock: C) -> Self {
        Self {
            account_store,
            clock,
        }
    }

    /// Execute the activate use case
    ///
    /// The code is checked and cleared in one store operation, so of several
    /// concurrent calls with the same code at most one succeeds.
    #[tracing::instrument(name = "ActivateUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        code: ActivationCode,
    ) -> Result<(), AccountLifecycleError> {
        let outcome = self
            .account_store
            .consume_code(
                CodeLookup::ById(account_id),
                &code,
                self.clock.now(),
                CodeConsumption::Activate,
            )
            .await?;

        match outcome {
            CodeValidationOutcome::Valid(account) => {
                tracing::info!(account_id = %account.id, "Account activated");
                Ok(())
            }
            CodeValidationOutcome::Expired => {
                tracing::debug!("Activation code expired");
                Err(AccountLifecycleError::InvalidOrExpiredCode)
            }
            CodeValidationOutcome::NotFound => Err(AccountLifecycleError::InvalidOrExpiredCode),
        }
    }
}
