//! # Gatehouse - Account Lifecycle Service Library
//!
//! This is a facade crate that re-exports the public APIs of the gatehouse components.
//! Use this crate to get access to all account functionality in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `ActivationCode`, etc.
//! - **Ports**: `AccountStore`, `CredentialHasher`, `NotificationSender`, `Clock`
//! - **Use cases**: `RegisterUseCase`, `ActivateUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `Argon2CredentialHasher`, `PostmarkNotificationSender`
//! - **Service**: `AccountService` - The main entry point for the HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

pub use gatehouse_core::{
    Account, AccountError, AccountId, ActivationCode, CredentialHash, Email, Notification,
    Password, PendingCode, ProfileUpdate,
};

// ============================================================================
// Ports
// ============================================================================

pub use gatehouse_core::{
    AccountStore, AccountStoreError, Clock, CredentialHasher, HasherError, NotificationError,
    NotificationSender, SystemClock,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

pub use gatehouse_application::{
    AccountLifecycleError, ActivateUseCase, ConfirmPasswordResetUseCase, LifecyclePolicy,
    LoginUseCase, ReissueActivationCodeUseCase, RegisterUseCase, RequestPasswordResetUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use gatehouse_adapters::{auth, config, email, hashing, http, persistence};
}

pub use gatehouse_adapters::{
    Argon2CredentialHasher, HashMapAccountStore, JwtConfig, JwtTokenIssuer,
    PostgresAccountStore, PostmarkNotificationSender, RecordingNotificationSender,
    TracingNotificationSender,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use gatehouse_service::{AccountService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
