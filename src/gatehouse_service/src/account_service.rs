use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
};
use gatehouse_adapters::{
    JwtTokenIssuer,
    config::AllowedOrigins,
    http::{AppState, routes::account_routes},
};
use gatehouse_application::LifecyclePolicy;
use gatehouse_core::{AccountStore, Clock, CredentialHasher, NotificationSender};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Account lifecycle and administration service exposing every account route
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService from its ports
    ///
    /// # Arguments
    /// * `account_store` - Store for account data (must be Clone)
    /// * `hasher` - One-way password hasher
    /// * `notifier` - Delivers activation and reset codes
    /// * `clock` - Time source for code expiry
    /// * `policy` - Code lifetime and login activation rule
    /// * `token_issuer` - Issues and validates bearer tokens
    pub fn new<S, H, N, C>(
        account_store: S,
        hasher: H,
        notifier: N,
        clock: C,
        policy: LifecyclePolicy,
        token_issuer: JwtTokenIssuer,
    ) -> Self
    where
        S: AccountStore + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
        N: NotificationSender + Clone + 'static,
        C: Clock + Clone + 'static,
    {
        let state = AppState::new(account_store, hasher, notifier, clock, policy, token_issuer);

        Self {
            router: account_routes(state),
        }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AccountService into a router that can be nested into another application
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the account service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
