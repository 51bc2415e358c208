use axum::extract::FromRef;
use gatehouse_application::LifecyclePolicy;

use crate::auth::JwtTokenIssuer;

/// Ports and settings shared by every account route. Each port is `Clone`
/// over shared internals, so handlers build their use case from a clone.
#[derive(Clone)]
pub struct AppState<S, H, N, C> {
    pub account_store: S,
    pub hasher: H,
    pub notifier: N,
    pub clock: C,
    pub policy: LifecyclePolicy,
    pub token_issuer: JwtTokenIssuer,
}

impl<S, H, N, C> AppState<S, H, N, C> {
    pub fn new(
        account_store: S,
        hasher: H,
        notifier: N,
        clock: C,
        policy: LifecyclePolicy,
        token_issuer: JwtTokenIssuer,
    ) -> Self {
        Self {
            account_store,
            hasher,
            notifier,
            clock,
            policy,
            token_issuer,
        }
    }
}

impl<S, H, N, C> FromRef<AppState<S, H, N, C>> for JwtTokenIssuer {
    fn from_ref(state: &AppState<S, H, N, C>) -> Self {
        state.token_issuer.clone()
    }
}
