pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{
        Account, CodeConsumption, CodeLookup, CodeValidationOutcome, PendingCode, ProfileUpdate,
    },
    account_error::AccountError,
    account_id::AccountId,
    activation_code::ActivationCode,
    credential_hash::CredentialHash,
    email::Email,
    notification::Notification,
    password::Password,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{
        Clock, CredentialHasher, HasherError, NotificationError, NotificationSender, SystemClock,
    },
};
