use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use todolist_core::{
    Email, Item, ItemId, ListId, TodoList, TodoStore, TodoStoreError, User, UserId, UserStore,
    UserStoreError, Username,
};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    users_by_username: HashMap<Username, UserId>,
    users_by_email: HashMap<Email, UserId>,
    lists: HashMap<ListId, TodoList>,
    items: HashMap<ItemId, Item>,
}

/// In-memory store. Everything sits behind one lock, so `add_user` updates
/// the record and both lookup tables as a unit.
#[derive(Default, Clone)]
pub struct HashMapStore {
    tables: Arc<RwLock<Tables>>,
}

impl HashMapStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut tables = self.tables.write().await;
        if tables.users_by_username.contains_key(user.username())
            || tables.users_by_email.contains_key(user.email())
        {
            return Err(UserStoreError::UserAlreadyExists);
        }

        tables
            .users_by_username
            .insert(user.username().clone(), user.id());
        tables.users_by_email.insert(user.email().clone(), user.id());
        tables.users.insert(user.id(), user);
        Ok(())
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        let tables = self.tables.read().await;
        tables
            .users_by_username
            .get(username)
            .and_then(|id| tables.users.get(id))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let tables = self.tables.read().await;
        tables
            .users_by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }
}

#[async_trait::async_trait]
impl TodoStore for HashMapStore {
    async fn create_list(&self, list: &TodoList) -> Result<ListId, TodoStoreError> {
        let mut tables = self.tables.write().await;
        tables.lists.insert(list.id(), list.clone());
        Ok(list.id())
    }

    async fn get_list(&self, id: &ListId) -> Result<TodoList, TodoStoreError> {
        let tables = self.tables.read().await;
        tables
            .lists
            .get(id)
            .cloned()
            .ok_or(TodoStoreError::ListNotFound)
    }

    async fn get_lists(&self) -> Result<Vec<TodoList>, TodoStoreError> {
        Err(TodoStoreError::Unimplemented("listing all lists"))
    }

    async fn create_item(&self, item: &Item) -> Result<ItemId, TodoStoreError> {
        let mut tables = self.tables.write().await;
        tables.items.insert(item.id(), item.clone());
        Ok(item.id())
    }

    async fn get_item(&self, id: &ItemId) -> Result<Item, TodoStoreError> {
        let tables = self.tables.read().await;
        tables
            .items
            .get(id)
            .cloned()
            .ok_or(TodoStoreError::ItemNotFound)
    }

    async fn update_item(&self, id: &ItemId, item: &Item) -> Result<(), TodoStoreError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .items
            .get_mut(id)
            .ok_or(TodoStoreError::ItemNotFound)?;

        *stored = Item::from_parts(
            stored.id(),
            stored.created_at(),
            item.title().to_owned(),
            item.description().to_owned(),
            item.is_done(),
        );
        Ok(())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), TodoStoreError> {
        let mut tables = self.tables.write().await;
        tables
            .items
            .remove(id)
            .ok_or(TodoStoreError::DeleteFailed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::Secret;
    use todolist_core::HashedPassword;

    use super::*;

    fn user(username: &str, email: &str) -> User {
        User::new(
            Username::parse(username).unwrap(),
            Email::parse(email).unwrap(),
            HashedPassword::parse(Secret::new("password1".to_string())).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_add_user_indexes_username_and_email() {
        let store = HashMapStore::new();
        let alice = user("alice", "a@example.com");
        store.add_user(alice.clone()).await.unwrap();

        assert_eq!(store.get_user_by_id(&alice.id()).await.unwrap(), alice);
        assert_eq!(
            store.get_user_by_username(alice.username()).await.unwrap(),
            alice
        );
        assert_eq!(store.get_user_by_email(alice.email()).await.unwrap(), alice);
    }

    #[tokio::test]
    async fn test_duplicates_leave_no_partial_state() {
        let store = HashMapStore::new();
        store.add_user(user("alice", "a@example.com")).await.unwrap();

        let same_name = user("alice", "b@example.com");
        let same_email = user("bob1", "a@example.com");

        assert_eq!(
            store.add_user(same_name.clone()).await,
            Err(UserStoreError::UserAlreadyExists)
        );
        assert_eq!(
            store.add_user(same_email.clone()).await,
            Err(UserStoreError::UserAlreadyExists)
        );

        assert_eq!(
            store.get_user_by_id(&same_name.id()).await,
            Err(UserStoreError::UserNotFound)
        );
        assert_eq!(
            store.get_user_by_email(same_name.email()).await,
            Err(UserStoreError::UserNotFound)
        );
        assert_eq!(
            store.get_user_by_username(same_email.username()).await,
            Err(UserStoreError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let store = HashMapStore::new();
        let item = Item::new("Buy milk", "").unwrap();
        store.create_item(&item).await.unwrap();

        let mut changed = Item::new("Buy bread", "wholemeal").unwrap();
        changed.set_done(true);
        store.update_item(&item.id(), &changed).await.unwrap();

        let stored = store.get_item(&item.id()).await.unwrap();
        assert_eq!(stored.id(), item.id());
        assert_eq!(stored.created_at(), item.created_at());
        assert_eq!(stored.title(), "Buy bread");
        assert!(stored.is_done());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_item() {
        let store = HashMapStore::new();
        let item = Item::new("Buy milk", "").unwrap();

        assert_eq!(
            store.update_item(&item.id(), &item).await,
            Err(TodoStoreError::ItemNotFound)
        );
        assert_eq!(
            store.delete_item(&item.id()).await,
            Err(TodoStoreError::DeleteFailed)
        );
    }
}
