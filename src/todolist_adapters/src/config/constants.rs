pub const BASE_CONFIG_FILE: &str = "config/base";

pub mod env {
    /// Every setting can be overridden from the environment, e.g.
    /// `TODOLIST__AUTH__JWT_SECRET` or `TODOLIST__STORAGE__BACKEND`.
    pub const PREFIX: &str = "TODOLIST";
    pub const SEPARATOR: &str = "__";
}

pub mod defaults {
    pub const STORAGE_BACKEND: &str = "memory";
    pub const REDIS_HOST_NAME: &str = "127.0.0.1";
    pub const POSTGRES_MAX_CONNECTIONS: i64 = 5;
}
