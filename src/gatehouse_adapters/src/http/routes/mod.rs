pub mod auth;
pub mod error;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use gatehouse_core::{AccountStore, Clock, CredentialHasher, NotificationSender};

use super::state::AppState;

pub use auth::{
    activate, confirm_password_reset, login, profile, register, reissue_activation_code,
    request_password_reset,
};
pub use users::{create_account, delete_account, get_account, list_accounts, update_account};

/// All account routes, bound to their shared state.
pub fn account_routes<S, H, N, C>(state: AppState<S, H, N, C>) -> Router
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    Router::new()
        .route("/auth/register", post(register::<S, H, N, C>))
        .route("/auth/login", post(login::<S, H, N, C>))
        .route("/auth/activate", post(activate::<S, H, N, C>))
        .route(
            "/auth/reissue-code",
            post(reissue_activation_code::<S, H, N, C>),
        )
        .route(
            "/auth/password-reset",
            post(request_password_reset::<S, H, N, C>),
        )
        .route(
            "/auth/password-reset/confirm",
            post(confirm_password_reset::<S, H, N, C>),
        )
        .route("/auth/profile", get(profile::<S, H, N, C>))
        .route(
            "/users",
            post(create_account::<S, H, N, C>).get(list_accounts::<S, H, N, C>),
        )
        .route(
            "/users/{id}",
            get(get_account::<S, H, N, C>)
                .patch(update_account::<S, H, N, C>)
                .delete(delete_account::<S, H, N, C>),
        )
        .with_state(state)
}
