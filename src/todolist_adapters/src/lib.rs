pub mod auth;
pub mod config;
pub mod persistence;

pub use auth::jwt_token_issuer::{JwtAuthConfig, JwtTokenIssuer};
pub use persistence::{
    hashmap_store::HashMapStore, postgres_store::PostgresStore, redis_store::RedisStore,
};
