use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{
        email::Email,
        todo::{Item, ItemId, ListId, TodoList},
        user::{User, UserId},
        username::Username,
    },
    error_kind::ErrorKind,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl UserStoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserAlreadyExists => ErrorKind::Conflict,
            Self::UserNotFound => ErrorKind::NotFound,
            Self::UnexpectedError(_) => ErrorKind::Internal,
        }
    }
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence of user accounts.
///
/// `add_user` must reject a user whose username or email is already taken
/// with `UserAlreadyExists`, and must never leave a user stored without both
/// lookup entries, or a lookup entry pointing nowhere.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;
}

// TodoStore port trait and errors
#[derive(Debug, Error)]
pub enum TodoStoreError {
    #[error("List not found")]
    ListNotFound,
    #[error("Item not found")]
    ItemNotFound,
    #[error("Delete failed: nothing was removed")]
    DeleteFailed,
    #[error("Not implemented: {0}")]
    Unimplemented(&'static str),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl TodoStoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ListNotFound | Self::ItemNotFound | Self::DeleteFailed => ErrorKind::NotFound,
            Self::Unimplemented(_) => ErrorKind::Unimplemented,
            Self::UnexpectedError(_) => ErrorKind::Internal,
        }
    }
}

impl PartialEq for TodoStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ListNotFound, Self::ListNotFound)
                | (Self::ItemNotFound, Self::ItemNotFound)
                | (Self::DeleteFailed, Self::DeleteFailed)
                | (Self::Unimplemented(_), Self::Unimplemented(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence of lists and items.
///
/// A list is stored together with a serialized copy of its items, while
/// every item is also addressable on its own by its ID.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create_list(&self, list: &TodoList) -> Result<ListId, TodoStoreError>;
    async fn get_list(&self, id: &ListId) -> Result<TodoList, TodoStoreError>;
    /// Listing every list is not built; implementations return `Unimplemented`.
    async fn get_lists(&self) -> Result<Vec<TodoList>, TodoStoreError>;

    async fn create_item(&self, item: &Item) -> Result<ItemId, TodoStoreError>;
    async fn get_item(&self, id: &ItemId) -> Result<Item, TodoStoreError>;
    /// Overwrites the stored title, description and completion flag.
    async fn update_item(&self, id: &ItemId, item: &Item) -> Result<(), TodoStoreError>;
    /// Fails with `DeleteFailed` if nothing was removed.
    async fn delete_item(&self, id: &ItemId) -> Result<(), TodoStoreError>;
}

/// The full persistence contract consumed by the services.
pub trait StoragePort: UserStore + TodoStore {}

impl<T: UserStore + TodoStore> StoragePort for T {}
