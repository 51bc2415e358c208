use gatehouse_core::{
    AccountStore, ActivationCode, Clock, CodeConsumption, CodeLookup, CodeValidationOutcome,
    CredentialHasher, Email, Password,
};

use crate::AccountLifecycleError;

/// Confirm password reset use case - consumes a reset code and sets the new password
pub struct ConfirmPasswordResetUseCase<S, H, C>
where
    S: AccountStore,
    H: CredentialHasher,
    C: Clock,
{
    account_store: S,
    hasher: H,
    clock: C,
}

impl<S, H, C> ConfirmPasswordResetUseCase<S, H, C>
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

    /// Execute the confirm password reset use case
    ///
    /// # Arguments
    /// * `email` - Address of the account being reset
    /// * `code` - The reset code mailed to that address
    /// * `new_password` / `confirm_password` - Must be identical
    ///
    /// # Returns
    /// Ok(()) once the credential has been replaced and the code cleared
    #[tracing::instrument(
        name = "ConfirmPasswordResetUseCase::execute",
        skip(self, code, new_password, confirm_password)
    )]
    pub async fn execute(
        &self,
        email: Email,
        code: ActivationCode,
        new_password: Password,
        confirm_password: Password,
    ) -> Result<(), AccountLifecycleError> {
        if new_password != confirm_password {
            return Err(AccountLifecycleError::PasswordMismatch);
        }

        if self.account_store.find_by_email(&email).await?.is_none() {
            return Err(AccountLifecycleError::NotFound);
        }

        let credential_hash = self.hasher.hash(&new_password).await?;

        let outcome = self
            .account_store
            .consume_code(
                CodeLookup::ByEmail(email),
                &code,
                self.clock.now(),
                CodeConsumption::ResetCredential(credential_hash),
            )
            .await?;

        match outcome {
            CodeValidationOutcome::Valid(account) => {
                tracing::info!(account_id = %account.id, "Password reset confirmed");
                Ok(())
            }
            CodeValidationOutcome::Expired | CodeValidationOutcome::NotFound => {
                Err(AccountLifecycleError::InvalidOrExpiredCode)
            }
        }
    }
}
