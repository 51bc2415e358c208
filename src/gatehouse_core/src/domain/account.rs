use chrono::{DateTime, Duration, Utc};

use super::{
    account_id::AccountId, activation_code::ActivationCode, credential_hash::CredentialHash,
    email::Email,
};

/// A one-time code together with the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCode {
    pub code: ActivationCode,
    pub expires_at: DateTime<Utc>,
}

impl PendingCode {
    /// Issues a fresh random code valid for `ttl` from `now`.
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code: ActivationCode::new(),
            expires_at: now + ttl,
        }
    }

    /// The window is half-open: a code is accepted strictly before its expiry.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// A registered user account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: Email,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub credential_hash: CredentialHash,
    pub is_active: bool,
    pub pending_code: Option<PendingCode>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// A freshly registered, inactive account.
    pub fn new(
        email: Email,
        display_name: Option<String>,
        credential_hash: CredentialHash,
        pending_code: Option<PendingCode>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            email,
            display_name,
            phone: None,
            address: None,
            image: None,
            credential_hash,
            is_active: false,
            pending_code,
            created_at: now,
        }
    }

    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        if let Some(display_name) = update.display_name {
            self.display_name = Some(display_name);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
    }

    /// Checks `code` against the pending code and, when it is accepted,
    /// applies `consumption` and clears the code.
    ///
    /// A code only counts for the flow that can have issued it: activation
    /// needs an inactive account, a credential reset an active one. Anything
    /// else is reported as `NotFound`.
    ///
    /// Callers must hold exclusive access to the account for the whole call so
    /// that a code can only ever be consumed once.
    pub fn consume_code(
        &mut self,
        code: &ActivationCode,
        now: DateTime<Utc>,
        consumption: CodeConsumption,
    ) -> CodeValidationOutcome {
        let Some(pending) = self.pending_code.as_ref() else {
            return CodeValidationOutcome::NotFound;
        };
        if &pending.code != code || self.is_active != consumption.requires_active() {
            return CodeValidationOutcome::NotFound;
        }
        if !pending.is_valid_at(now) {
            return CodeValidationOutcome::Expired;
        }

        match consumption {
            CodeConsumption::Activate => self.is_active = true,
            CodeConsumption::ResetCredential(hash) => self.credential_hash = hash,
        }
        self.pending_code = None;

        CodeValidationOutcome::Valid(Box::new(self.clone()))
    }
}

/// Profile fields an account owner may change. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
}

/// How the account holding a code is located.
#[derive(Debug, Clone)]
pub enum CodeLookup {
    ById(AccountId),
    ByEmail(Email),
}

/// What a successfully consumed code does to the account.
#[derive(Debug, Clone)]
pub enum CodeConsumption {
    Activate,
    ResetCredential(CredentialHash),
}

impl CodeConsumption {
    /// The activation state an account must be in for this consumption.
    pub fn requires_active(&self) -> bool {
        matches!(self, Self::ResetCredential(_))
    }
}

#[derive(Debug)]
pub enum CodeValidationOutcome {
    /// The code matched and was consumed; holds the updated account.
    Valid(Box<Account>),
    Expired,
    NotFound,
}
