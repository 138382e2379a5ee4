use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Duration;
use secrecy::Secret;
use todolist_core::{
    Email, HashedPassword, Item, ItemId, ListId, SessionClaims, SessionToken, TodoList, TodoStore,
    TodoStoreError, TokenError, TokenIssuer, User, UserId, UserStore, UserStoreError, Username,
};
use tokio::sync::RwLock;

// Mock store shared by the use case and service tests
#[derive(Clone, Default)]
pub struct MockStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    lists: Arc<RwLock<HashMap<ListId, TodoList>>>,
    items: Arc<RwLock<HashMap<ItemId, Item>>>,
    item_creates_before_failure: Option<usize>,
    item_creates: Arc<AtomicUsize>,
}

impl MockStore {
    /// Fails every `create_item` after the first `successes` calls.
    pub fn failing_item_creates_after(successes: usize) -> Self {
        Self {
            item_creates_before_failure: Some(successes),
            ..Self::default()
        }
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn list_count(&self) -> usize {
        self.lists.read().await.len()
    }
}

#[async_trait]
impl UserStore for MockStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username() == user.username() || u.email() == user.email())
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.id(), user);
        Ok(())
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.username() == username)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(UserStoreError::UserNotFound)
    }
}

#[async_trait]
impl TodoStore for MockStore {
    async fn create_list(&self, list: &TodoList) -> Result<ListId, TodoStoreError> {
        self.lists.write().await.insert(list.id(), list.clone());
        Ok(list.id())
    }

    async fn get_list(&self, id: &ListId) -> Result<TodoList, TodoStoreError> {
        let lists = self.lists.read().await;
        lists.get(id).cloned().ok_or(TodoStoreError::ListNotFound)
    }

    async fn get_lists(&self) -> Result<Vec<TodoList>, TodoStoreError> {
        Err(TodoStoreError::Unimplemented("get_lists"))
    }

    async fn create_item(&self, item: &Item) -> Result<ItemId, TodoStoreError> {
        let attempt = self.item_creates.fetch_add(1, Ordering::SeqCst);
        if self
            .item_creates_before_failure
            .is_some_and(|successes| attempt >= successes)
        {
            return Err(TodoStoreError::UnexpectedError(
                "connection reset".to_string(),
            ));
        }
        self.items.write().await.insert(item.id(), item.clone());
        Ok(item.id())
    }

    async fn get_item(&self, id: &ItemId) -> Result<Item, TodoStoreError> {
        let items = self.items.read().await;
        items.get(id).cloned().ok_or(TodoStoreError::ItemNotFound)
    }

    async fn update_item(&self, id: &ItemId, item: &Item) -> Result<(), TodoStoreError> {
        let mut items = self.items.write().await;
        let stored = items.get_mut(id).ok_or(TodoStoreError::ItemNotFound)?;
        *stored = item.clone();
        Ok(())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), TodoStoreError> {
        let mut items = self.items.write().await;
        items.remove(id).ok_or(TodoStoreError::DeleteFailed)?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockTokenIssuer;

impl TokenIssuer for MockTokenIssuer {
    fn issue(&self, user: &User) -> Result<SessionToken, TokenError> {
        Ok(SessionToken::new(format!(
            "{}:{}",
            user.id(),
            user.username()
        )))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let (id, username) = token
            .split_once(':')
            .ok_or_else(|| TokenError::InvalidToken("malformed".to_string()))?;
        let user_id =
            UserId::parse(id).map_err(|e| TokenError::InvalidToken(e.to_string()))?;
        let issued_at = todolist_core::domain::now_in_seconds();
        Ok(SessionClaims {
            user_id,
            username: username.to_string(),
            issued_at,
            expires_at: issued_at + Duration::hours(72),
        })
    }
}

#[derive(Clone)]
pub struct FailingTokenIssuer;

impl TokenIssuer for FailingTokenIssuer {
    fn issue(&self, _user: &User) -> Result<SessionToken, TokenError> {
        Err(TokenError::UnexpectedError("signing key rejected".to_string()))
    }

    fn verify(&self, _token: &str) -> Result<SessionClaims, TokenError> {
        Err(TokenError::InvalidToken("always".to_string()))
    }
}

pub fn stored_user(username: &str, email: &str, password: &str) -> User {
    User::new(
        Username::parse(username).unwrap(),
        Email::parse(email).unwrap(),
        HashedPassword::parse(Secret::new(password.to_string())).unwrap(),
    )
}
