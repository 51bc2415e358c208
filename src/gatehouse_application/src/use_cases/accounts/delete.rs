use gatehouse_core::{AccountId, AccountStore};

use crate::AccountLifecycleError;

/// Delete account use case - removes an account permanently
pub struct DeleteAccountUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> DeleteAccountUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, id: AccountId) -> Result<(), AccountLifecycleError> {
        self.account_store.delete(&id).await?;
        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}
