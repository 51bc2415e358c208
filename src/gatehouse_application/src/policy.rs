use chrono::Duration;

pub const DEFAULT_CODE_TTL_SECONDS: i64 = 180;

/// Tunables of the account lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct LifecyclePolicy {
    /// How long an issued activation or reset code stays valid.
    pub code_ttl: Duration,
    /// Refuse logins for accounts that were never activated.
    pub require_activation_for_login: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            code_ttl: Duration::seconds(DEFAULT_CODE_TTL_SECONDS),
            require_activation_for_login: true,
        }
    }
}
