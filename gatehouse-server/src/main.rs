use color_eyre::eyre::Result;
use gatehouse::{
    AccountService, Argon2CredentialHasher, Email, ExposeSecret, JwtTokenIssuer,
    PostgresAccountStore, PostmarkNotificationSender, Secret, SystemClock,
    TracingNotificationSender, adapters::config::Settings, configure_postgresql,
};
use reqwest::Client as HttpClient;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = Settings::load()?;

    let pg_pool = configure_postgresql(&config.postgres).await?;
    let account_store = PostgresAccountStore::new(pg_pool);
    let token_issuer = JwtTokenIssuer::new(config.auth.jwt.clone());
    let policy = config.lifecycle.policy();

    // Without a Postmark token, notifications are only logged
    let account_service = if config.email_client.auth_token.expose_secret().is_empty() {
        tracing::warn!("No email auth token configured, notifications will not be delivered");
        AccountService::new(
            account_store,
            Argon2CredentialHasher::new(),
            TracingNotificationSender::new(),
            SystemClock,
            policy,
            token_issuer,
        )
    } else {
        let http_client = HttpClient::builder()
            .timeout(config.email_client.timeout())
            .build()?;

        let notifier = PostmarkNotificationSender::new(
            config.email_client.base_url.clone(),
            Email::try_from(Secret::new(config.email_client.sender.clone()))?,
            config.email_client.auth_token.clone(),
            http_client,
        );

        AccountService::new(
            account_store,
            Argon2CredentialHasher::new(),
            notifier,
            SystemClock,
            policy,
            token_issuer,
        )
    };

    let allowed_origins = config.auth.allowed_origins.clone();
    let allowed_origins = (!allowed_origins.is_empty()).then_some(allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.application.address).await?;
    tracing::info!("Starting gatehouse account service...");

    account_service
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
