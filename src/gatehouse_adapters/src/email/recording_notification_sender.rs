use std::sync::Arc;

use gatehouse_core::{Email, Notification, NotificationError, NotificationSender};
use tokio::sync::RwLock;

/// Keeps every notification in memory instead of delivering it, so tests can
/// read the issued codes back. Nothing is ever evicted.
#[derive(Default, Clone)]
pub struct RecordingNotificationSender {
    sent: Arc<RwLock<Vec<(Email, Notification)>>>,
}

impl RecordingNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<(Email, Notification)> {
        self.sent.read().await.clone()
    }

    /// The most recent notification addressed to `recipient`.
    pub async fn last_for(&self, recipient: &Email) -> Option<Notification> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|(email, _)| email == recipient)
            .map(|(_, notification)| notification.clone())
    }
}

#[async_trait::async_trait]
impl NotificationSender for RecordingNotificationSender {
    async fn send(
        &self,
        recipient: &Email,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        tracing::debug!(template = notification.template_name(), "Recorded notification");

        self.sent
            .write()
            .await
            .push((recipient.clone(), notification.clone()));
        Ok(())
    }
}
