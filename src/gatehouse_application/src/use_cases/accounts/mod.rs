//! Administrative account management: create, list, read, update and delete.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::{CreateAccountUseCase, NewAccount};
pub use delete::DeleteAccountUseCase;
pub use get::GetAccountUseCase;
pub use list::{AccountPage, ListAccountsUseCase, PageRequest};
pub use update::UpdateAccountUseCase;
