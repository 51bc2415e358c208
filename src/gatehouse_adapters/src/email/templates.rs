//! Email bodies for account notifications.

use askama::Template;
use chrono::{DateTime, Utc};
use gatehouse_core::{Notification, NotificationError};

#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<body style="font-family: sans-serif;">
  <p>Hello {{ name }},</p>
  <p>{{ intro }}</p>
  <p style="font-size: 20px; font-family: monospace;"><strong>{{ code }}</strong></p>
  <p>The code can be used once and expires at {{ expires_at }}.</p>
  <p>If you did not ask for this, you can ignore this email.</p>
</body>
</html>"#
)]
struct CodeEmailHtml<'a> {
    name: &'a str,
    intro: &'a str,
    code: &'a str,
    expires_at: &'a str,
}

#[derive(Template)]
#[template(
    ext = "txt",
    source = "Hello {{ name }},

{{ intro }}

    {{ code }}

The code can be used once and expires at {{ expires_at }}.
If you did not ask for this, you can ignore this email."
)]
struct CodeEmailText<'a> {
    name: &'a str,
    intro: &'a str,
    code: &'a str,
    expires_at: &'a str,
}

const ACTIVATION_SUBJECT: &str = "Activate your account";
const ACTIVATION_INTRO: &str = "Use the code below to activate your account.";
const RESET_SUBJECT: &str = "Reset your password";
const RESET_INTRO: &str = "Use the code below to choose a new password.";

fn format_expiry(expires_at: &DateTime<Utc>) -> String {
    expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn render(notification: &Notification) -> Result<RenderedEmail, NotificationError> {
    let (subject, intro, display_name, expires_at) = match notification {
        Notification::Activation {
            display_name,
            expires_at,
            ..
        } => (ACTIVATION_SUBJECT, ACTIVATION_INTRO, display_name, expires_at),
        Notification::PasswordReset {
            display_name,
            expires_at,
            ..
        } => (RESET_SUBJECT, RESET_INTRO, display_name, expires_at),
    };

    let name = display_name.as_deref().unwrap_or("there");
    let code = notification.code().as_str();
    let expires_at = format_expiry(expires_at);

    let html = CodeEmailHtml {
        name,
        intro,
        code,
        expires_at: &expires_at,
    }
    .render()
    .map_err(|e| NotificationError(e.to_string()))?;

    let text = CodeEmailText {
        name,
        intro,
        code,
        expires_at: &expires_at,
    }
    .render()
    .map_err(|e| NotificationError(e.to_string()))?;

    Ok(RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::ActivationCode;

    #[test]
    fn test_activation_email_contains_code() {
        let code = ActivationCode::new();
        let rendered = render(&Notification::Activation {
            display_name: Some("Ann".to_owned()),
            code: code.clone(),
            expires_at: Utc::now(),
        })
        .unwrap();

        assert_eq!(rendered.subject, "Activate your account");
        assert!(rendered.html.contains(code.as_str()));
        assert!(rendered.text.contains(code.as_str()));
        assert!(rendered.text.starts_with("Hello Ann,"));
    }

    #[test]
    fn test_reset_email_escapes_display_name() {
        let rendered = render(&Notification::PasswordReset {
            display_name: Some("<b>Bob</b>".to_owned()),
            code: ActivationCode::new(),
            expires_at: Utc::now(),
        })
        .unwrap();

        assert_eq!(rendered.subject, "Reset your password");
        assert!(!rendered.html.contains("<b>Bob</b>"));
        assert!(rendered.text.contains("<b>Bob</b>"));
    }

    #[test]
    fn test_missing_display_name_falls_back() {
        let rendered = render(&Notification::Activation {
            display_name: None,
            code: ActivationCode::new(),
            expires_at: Utc::now(),
        })
        .unwrap();

        assert!(rendered.text.starts_with("Hello there,"));
    }
}
