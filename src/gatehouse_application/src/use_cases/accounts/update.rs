use gatehouse_core::{Account, AccountId, AccountStore, ProfileUpdate};

use crate::AccountLifecycleError;

/// Update account use case - changes profile fields; email and credentials are untouched
pub struct UpdateAccountUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> UpdateAccountUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "UpdateAccountUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, AccountLifecycleError> {
        Ok(self.account_store.update_profile(&id, update).await?)
    }
}
