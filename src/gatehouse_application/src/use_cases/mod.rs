pub mod accounts;
pub mod activate;
pub mod confirm_password_reset;
pub mod login;
pub mod register;
pub mod reissue_activation_code;
pub mod request_password_reset;

pub use activate::ActivateUseCase;
pub use confirm_password_reset::ConfirmPasswordResetUseCase;
pub use login::LoginUseCase;
pub use register::RegisterUseCase;
pub use reissue_activation_code::ReissueActivationCodeUseCase;
pub use request_password_reset::{PasswordResetRequested, RequestPasswordResetUseCase};
