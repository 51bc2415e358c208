pub mod account;
pub mod account_error;
pub mod account_id;
pub mod activation_code;
pub mod credential_hash;
pub mod email;
pub mod notification;
pub mod password;
