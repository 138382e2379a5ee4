use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;
use todolist_core::domain::session::DEFAULT_SESSION_TTL_SECONDS;

use super::constants::{BASE_CONFIG_FILE, defaults, env};
use crate::auth::jwt_token_issuer::JwtAuthConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub storage: StorageSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Redis,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub redis: RedisSettings,
    pub postgres: PostgresSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    /// Only required when the postgres backend is selected.
    pub url: Option<Secret<String>>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl From<&AuthSettings> for JwtAuthConfig {
    fn from(settings: &AuthSettings) -> Self {
        JwtAuthConfig {
            jwt_secret: settings.jwt_secret.clone(),
            token_ttl_in_seconds: settings.token_ttl_in_seconds,
        }
    }
}

impl Settings {
    /// Loads `.env`, then `config/base.json` if present, then `TODOLIST__*`
    /// environment variables. Later sources win.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = Config::builder()
            .add_source(File::with_name(BASE_CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::PREFIX)
                    .prefix_separator(env::SEPARATOR)
                    .separator(env::SEPARATOR),
            );

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("storage.backend", defaults::STORAGE_BACKEND)?
            .set_default("storage.redis.host_name", defaults::REDIS_HOST_NAME)?
            .set_default(
                "storage.postgres.max_connections",
                defaults::POSTGRES_MAX_CONNECTIONS,
            )?
            .set_default("auth.token_ttl_in_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .build()?
            .try_deserialize()
    }
}
