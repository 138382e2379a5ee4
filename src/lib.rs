//! # Todolist
//!
//! Facade crate that re-exports the public API of the todolist workspace:
//! credential and to-do domain types, the storage ports, the user and to-do
//! services, and the Redis, PostgreSQL and in-memory storage backends.
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `Email`, `HashedPassword`, `User`, `Item`, `TodoList`
//! - **Storage ports**: `UserStore`, `TodoStore`, `StoragePort`
//! - **Services**: `UserService`, `TodoService`
//! - **Adapters**: `RedisStore`, `PostgresStore`, `HashMapStore`, `JwtTokenIssuer`
//! - **Wiring**: `TodoApp`

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use todolist_core::*;
}

pub use todolist_core::{
    Email, ErrorKind, HashedPassword, Item, ItemError, ItemId, ListId, SessionClaims,
    SessionToken, TodoList, User, UserError, UserId, Username,
};

// ============================================================================
// Ports
// ============================================================================

pub use todolist_core::{
    StoragePort, TodoStore, TodoStoreError, TokenError, TokenIssuer, UserStore, UserStoreError,
};

// ============================================================================
// Services (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use todolist_application::use_cases::*;
}

pub use todolist_application::{
    LoginError, LoginRequest, SignupError, SignupRequest, TodoError, TodoService, UserService,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Storage backends
    pub mod persistence {
        pub use todolist_adapters::persistence::*;
    }

    /// Session token issuing
    pub mod auth {
        pub use todolist_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use todolist_adapters::config::*;
    }
}

pub use todolist_adapters::{HashMapStore, JwtAuthConfig, JwtTokenIssuer, PostgresStore, RedisStore};

// ============================================================================
// Wiring
// ============================================================================

pub use todolist_service::{TodoApp, configure_postgresql, configure_redis, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the storage ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
