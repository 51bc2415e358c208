use std::{path::Path, time::Duration};

use axum::http::HeaderValue;
use config::{
    Config, ConfigError, Environment, File, FileFormat,
    builder::{ConfigBuilder, DefaultState},
};
use gatehouse_application::LifecyclePolicy;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::constants::{self, defaults, env, prod};
use crate::auth::JwtConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
    pub lifecycle: LifecycleSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub jwt: JwtConfig,
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleSettings {
    pub code_ttl_seconds: i64,
    pub require_activation_for_login: bool,
}

impl LifecycleSettings {
    pub fn policy(&self) -> LifecyclePolicy {
        LifecyclePolicy {
            code_ttl: chrono::Duration::seconds(self.code_ttl_seconds),
            require_activation_for_login: self.require_activation_for_login,
        }
    }
}

/// Browser origins allowed by the CORS layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            address: prod::APP_ADDRESS.to_string(),
        }
    }
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            url: Secret::new(defaults::POSTGRES_URL.to_string()),
            max_connections: defaults::POSTGRES_MAX_CONNECTIONS,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: Secret::new(defaults::JWT_SECRET.to_string()),
            time_to_live: defaults::JWT_TIME_TO_LIVE_SECONDS,
        }
    }
}

impl Default for EmailClientSettings {
    fn default() -> Self {
        Self {
            base_url: prod::email_client::BASE_URL.to_string(),
            sender: prod::email_client::SENDER.to_string(),
            auth_token: Secret::new(String::new()),
            timeout_in_millis: prod::email_client::TIMEOUT_IN_MILLIS,
        }
    }
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        let policy = LifecyclePolicy::default();
        Self {
            code_ttl_seconds: policy.code_ttl.num_seconds(),
            require_activation_for_login: policy.require_activation_for_login,
        }
    }
}

impl Settings {
    /// Layers `config/base.json`, `config/<APP_ENVIRONMENT>.json` and
    /// `GATEHOUSE__*` environment variables, later sources winning.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_ENVIRONMENT.to_string());
        let config_dir = std::env::var(env::CONFIG_DIR_ENV_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_CONFIG_DIR.to_string());
        let config_dir = Path::new(&config_dir);

        let builder = Config::builder()
            .add_source(file_source(&config_dir.join("base.json")))
            .add_source(file_source(&config_dir.join(format!("{environment}.json"))))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_origins")
                    .try_parsing(true),
            );

        let settings = Self::from_builder(builder)?;
        settings.ensure_fit_for(&environment)?;

        tracing::debug!(%environment, "Loaded settings");
        Ok(settings)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    fn ensure_fit_for(&self, environment: &str) -> Result<(), ConfigError> {
        if environment == constants::PRODUCTION_ENVIRONMENT
            && self.auth.jwt.secret.expose_secret() == defaults::JWT_SECRET
        {
            return Err(ConfigError::Message(
                "auth.jwt.secret must be set for production".to_string(),
            ));
        }
        Ok(())
    }
}

fn file_source(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Json).required(false)
}
