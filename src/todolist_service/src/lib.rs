mod helpers;
mod telemetry;
mod todo_app;

pub use helpers::{
    SetupError, configure_postgresql, configure_redis, get_postgres_pool, get_redis_client,
};
pub use telemetry::init_tracing;
pub use todo_app::TodoApp;
