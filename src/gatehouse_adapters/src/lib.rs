pub mod auth;
pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod persistence;

pub use auth::{BearerAccount, JwtConfig, JwtTokenIssuer};
pub use email::{
    PostmarkNotificationSender, RecordingNotificationSender, TracingNotificationSender,
};
pub use hashing::Argon2CredentialHasher;
pub use http::{AccountApiError, AppState};
pub use persistence::{HashMapAccountStore, PostgresAccountStore};
