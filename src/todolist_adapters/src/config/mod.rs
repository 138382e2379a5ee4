pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AuthSettings, PostgresSettings, RedisSettings, Settings, StorageBackend, StorageSettings,
};
