use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    credential_hash::CredentialHash, email::Email, notification::Notification, password::Password,
};

#[derive(Debug, Error)]
#[error("Credential hashing failed: {0}")]
pub struct HasherError(pub String);

/// Port trait for one-way password hashing
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<CredentialHash, HasherError>;
    async fn verify(&self, password: &Password, hash: &CredentialHash)
    -> Result<bool, HasherError>;
}

#[derive(Debug, Error)]
#[error("Failed to send notification: {0}")]
pub struct NotificationError(pub String);

/// Port trait for delivering account notifications
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(
        &self,
        recipient: &Email,
        notification: &Notification,
    ) -> Result<(), NotificationError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
