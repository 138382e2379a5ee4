pub mod domain;
pub mod error_kind;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    password::HashedPassword,
    session::{SessionClaims, SessionToken},
    todo::{Item, ItemError, ItemId, ListId, TodoList},
    user::{User, UserError, UserId},
    username::Username,
};

pub use error_kind::ErrorKind;

pub use ports::{
    repositories::{StoragePort, TodoStore, TodoStoreError, UserStore, UserStoreError},
    services::{TokenError, TokenIssuer},
};
