use chrono::{DateTime, Utc};

use super::activation_code::ActivationCode;

/// A message the lifecycle asks the notification sender to deliver.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Activation {
        display_name: Option<String>,
        code: ActivationCode,
        expires_at: DateTime<Utc>,
    },
    PasswordReset {
        display_name: Option<String>,
        code: ActivationCode,
        expires_at: DateTime<Utc>,
    },
}

impl Notification {
    pub fn template_name(&self) -> &'static str {
        match self {
            Notification::Activation { .. } => "activation",
            Notification::PasswordReset { .. } => "password-reset",
        }
    }

    pub fn code(&self) -> &ActivationCode {
        match self {
            Notification::Activation { code, .. } | Notification::PasswordReset { code, .. } => {
                code
            }
        }
    }
}
