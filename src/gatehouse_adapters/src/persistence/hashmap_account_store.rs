use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use gatehouse_core::{
    Account, AccountId, AccountStore, AccountStoreError, ActivationCode, CodeConsumption,
    CodeLookup, CodeValidationOutcome, Email, PendingCode, ProfileUpdate,
};

#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn set_pending_code(
        &self,
        id: &AccountId,
        pending_code: PendingCode,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        account.pending_code = Some(pending_code);
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        account.apply_profile_update(update);
        Ok(account.clone())
    }

    async fn consume_code(
        &self,
        lookup: CodeLookup,
        code: &ActivationCode,
        now: DateTime<Utc>,
        consumption: CodeConsumption,
    ) -> Result<CodeValidationOutcome, AccountStoreError> {
        // The write guard spans both the check and the mutation.
        let mut accounts = self.accounts.write().await;
        let account = match &lookup {
            CodeLookup::ById(id) => accounts.get_mut(id),
            CodeLookup::ByEmail(email) => accounts.values_mut().find(|a| &a.email == email),
        };

        Ok(match account {
            Some(account) => account.consume_code(code, now, consumption),
            None => CodeValidationOutcome::NotFound,
        })
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let mut ordered: Vec<&Account> = accounts.values().collect();
        ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(ordered
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.len() as u64)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        accounts.remove(id).ok_or(AccountStoreError::AccountNotFound)?;
        Ok(())
    }
}
