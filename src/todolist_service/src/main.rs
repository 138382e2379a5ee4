use color_eyre::eyre::Result;
use todolist_adapters::{
    HashMapStore, JwtAuthConfig,
    config::{Settings, StorageBackend},
};
use todolist_core::StoragePort;
use todolist_service::{TodoApp, configure_postgresql, configure_redis, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;
    let jwt_config = JwtAuthConfig::from(&settings.auth);

    tracing::info!(backend = ?settings.storage.backend, "Starting todolist");

    match settings.storage.backend {
        StorageBackend::Memory => start(HashMapStore::new(), jwt_config).await,
        StorageBackend::Redis => {
            let store = configure_redis(&settings.storage.redis).await?;
            start(store, jwt_config).await
        }
        StorageBackend::Postgres => {
            let store = configure_postgresql(&settings.storage.postgres).await?;
            start(store, jwt_config).await
        }
    }
}

async fn start<S>(store: S, jwt_config: JwtAuthConfig) -> Result<()>
where
    S: StoragePort + Clone,
{
    let app = TodoApp::new(store, jwt_config);
    app.seed().await?;

    tracing::info!("Storage is ready");
    Ok(())
}
