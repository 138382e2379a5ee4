use redis::{Client, RedisResult, aio::ConnectionManager};
use secrecy::ExposeSecret;
use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use thiserror::Error;
use todolist_adapters::{
    PostgresStore, RedisStore,
    config::{PostgresSettings, RedisSettings},
};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("storage.postgres.url must be set to use the postgres backend")]
    MissingDatabaseUrl,
    #[error("Failed to connect to PostgreSQL: {0}")]
    Postgres(#[from] sqlx::Error),
    #[error("Failed to run migrations: {0}")]
    Migration(#[from] MigrateError),
    #[error("Failed to connect to Redis: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Connects to PostgreSQL and brings the schema up to date.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PostgresStore, SetupError> {
    let url = settings
        .url
        .as_ref()
        .ok_or(SetupError::MissingDatabaseUrl)?;

    let pg_pool = get_postgres_pool(url.expose_secret(), settings.max_connections).await?;
    let store = PostgresStore::new(pg_pool);
    store.migrate().await?;

    Ok(store)
}

/// Opens a managed Redis connection that reconnects on its own.
pub async fn configure_redis(settings: &RedisSettings) -> Result<RedisStore, SetupError> {
    let client = get_redis_client(&settings.host_name)?;
    let conn = ConnectionManager::new(client).await?;
    Ok(RedisStore::new(conn))
}

pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
