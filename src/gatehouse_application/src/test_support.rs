//! In-memory stand-ins for the ports, shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};
use gatehouse_core::{
    Account, AccountId, AccountStore, AccountStoreError, ActivationCode, Clock, CodeConsumption,
    CodeLookup, CodeValidationOutcome, CredentialHash, CredentialHasher, Email, HasherError,
    Notification, NotificationError, NotificationSender, Password, PendingCode, ProfileUpdate,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    calls: Arc<AtomicUsize>,
}

impl MockAccountStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts.read().await.get(id).cloned()
    }

    pub async fn put(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl AccountStore for MockAccountStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        self.record_call();
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        self.record_call();
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError> {
        self.record_call();
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
        self.record_call();
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
        self.record_call();
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
        self.record_call();
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
        self.record_call();
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, AccountStoreError> {
        self.record_call();
        Ok(self.accounts.read().await.len() as u64)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        self.record_call();
        self.accounts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(AccountStoreError::AccountNotFound)
    }
}

/// Reversible "hash" so tests can assert on stored credentials.
#[derive(Clone, Default)]
pub struct PlainHasher;

#[async_trait::async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, password: &Password) -> Result<CredentialHash, HasherError> {
        Ok(CredentialHash::new(Secret::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &CredentialHash,
    ) -> Result<bool, HasherError> {
        let expected = self.hash(password).await?;
        Ok(expected.as_ref().expose_secret() == hash.as_ref().expose_secret())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<(Email, Notification)>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<(Email, Notification)> {
        self.sent.read().await.clone()
    }

    pub async fn last_code(&self) -> ActivationCode {
        let sent = self.sent.read().await;
        let (_, notification) = sent.last().expect("a notification was sent");
        notification.code().clone()
    }
}

#[async_trait::async_trait]
impl NotificationSender for RecordingNotifier {
    async fn send(
        &self,
        recipient: &Email,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError("mail server unavailable".to_owned()));
        }
        self.sent
            .write()
            .await
            .push((recipient.clone(), notification.clone()));
        Ok(())
    }
}

#[derive(Clone)]
pub struct TestClock(Arc<std::sync::Mutex<DateTime<Utc>>>);

impl TestClock {
    pub fn new() -> Self {
        Self(Arc::new(std::sync::Mutex::new(Utc::now())))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_owned())).unwrap()
}
