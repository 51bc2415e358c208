use gatehouse_core::{Account, AccountId, AccountStore};

use crate::AccountLifecycleError;

pub struct GetAccountUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> GetAccountUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "GetAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, id: AccountId) -> Result<Account, AccountLifecycleError> {
        self.account_store
            .find_by_id(&id)
            .await?
            .ok_or(AccountLifecycleError::NotFound)
    }
}
