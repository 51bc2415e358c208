pub mod error;
pub mod policy;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::AccountLifecycleError;
pub use policy::LifecyclePolicy;
pub use use_cases::{
    ActivateUseCase, ConfirmPasswordResetUseCase, LoginUseCase, PasswordResetRequested,
    ReissueActivationCodeUseCase, RegisterUseCase, RequestPasswordResetUseCase,
    accounts::{
        AccountPage, CreateAccountUseCase, DeleteAccountUseCase, GetAccountUseCase,
        ListAccountsUseCase, NewAccount, PageRequest, UpdateAccountUseCase,
    },
};
