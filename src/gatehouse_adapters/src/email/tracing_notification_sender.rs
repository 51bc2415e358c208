use gatehouse_core::{Email, Notification, NotificationError, NotificationSender};

use super::templates::render;

/// Renders notifications and writes them to the log without delivering or
/// keeping them. Stands in for Postmark when no server token is configured.
///
/// The code itself is only emitted at `trace` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSender;

impl TracingNotificationSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl NotificationSender for TracingNotificationSender {
    #[tracing::instrument(name = "Logging undelivered notification", skip_all)]
    async fn send(
        &self,
        _recipient: &Email,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        let email = render(notification)?;

        tracing::info!(
            template = notification.template_name(),
            subject = %email.subject,
            "Notification not delivered, no email client configured"
        );
        tracing::trace!(code = notification.code().as_str(), "Undelivered code");

        Ok(())
    }
}
