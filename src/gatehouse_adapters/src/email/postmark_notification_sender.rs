use gatehouse_core::{Email, Notification, NotificationError, NotificationSender};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use super::templates;

#[derive(Clone)]
pub struct PostmarkNotificationSender {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkNotificationSender {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

fn send_error(e: impl ToString) -> NotificationError {
    NotificationError(e.to_string())
}

#[async_trait::async_trait]
impl NotificationSender for PostmarkNotificationSender {
    #[tracing::instrument(
        name = "Sending email",
        skip_all,
        fields(template = notification.template_name())
    )]
    async fn send(
        &self,
        recipient: &Email,
        notification: &Notification,
    ) -> Result<(), NotificationError> {
        let base = Url::parse(&self.base_url).map_err(send_error)?;
        let url = base.join("/email").map_err(send_error)?;
        let rendered = templates::render(notification)?;

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: &rendered.subject,
            html_body: &rendered.html,
            text_body: &rendered.text,
            message_stream: MESSAGE_STREAM,
            tag: notification.template_name(),
        };

        self.http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(send_error)?
            .error_for_status()
            .map_err(send_error)?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
    tag: &'a str,
}
