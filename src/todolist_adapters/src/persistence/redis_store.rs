use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Script, aio::ConnectionManager};
use secrecy::{ExposeSecret, Secret};
use todolist_core::{
    Email, HashedPassword, Item, ItemId, ListId, TodoList, TodoStore, TodoStoreError, User,
    UserId, UserStore, UserStoreError, Username,
};

const USER_KEY_PREFIX: &str = "users:";
const USERNAME_INDEX_KEY: &str = "usersByUsername";
const EMAIL_INDEX_KEY: &str = "usersByEmail";
const LIST_KEY_PREFIX: &str = "lists:";
const ITEM_KEY_PREFIX: &str = "items:";

// KEYS: user hash, username index, email index
// ARGV: id, createdAt, username, email, hashedPassword
static ADD_USER: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        if redis.call('HEXISTS', KEYS[2], ARGV[3]) == 1
            or redis.call('HEXISTS', KEYS[3], ARGV[4]) == 1 then
            return 0
        end
        redis.call('HSET', KEYS[1],
            'id', ARGV[1], 'createdAt', ARGV[2], 'username', ARGV[3],
            'email', ARGV[4], 'hashedPassword', ARGV[5])
        redis.call('HSET', KEYS[2], ARGV[3], ARGV[1])
        redis.call('HSET', KEYS[3], ARGV[4], ARGV[1])
        return 1
        "#,
    )
});

// KEYS: item hash
// ARGV: title, description, isDone
static UPDATE_ITEM: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return 0
        end
        redis.call('HSET', KEYS[1], 'title', ARGV[1], 'description', ARGV[2], 'isDone', ARGV[3])
        return 1
        "#,
    )
});

/// Store backed by Redis hashes. Multi-key writes go through Lua scripts so
/// they are applied atomically by the server.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    async fn read_hash(&self, key: &str) -> redis::RedisResult<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        conn.hgetall(key).await
    }
}

#[async_trait::async_trait]
impl UserStore for RedisStore {
    #[tracing::instrument(name = "Adding user to Redis", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut conn = self.conn.clone();
        let id = user.id().to_string();

        let added: i64 = ADD_USER
            .key(user_key(&id))
            .key(USERNAME_INDEX_KEY)
            .key(EMAIL_INDEX_KEY)
            .arg(&id)
            .arg(user.created_at().timestamp())
            .arg(user.username().as_str())
            .arg(user.email().as_str())
            .arg(user.password_hash().as_ref().expose_secret())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if added == 0 {
            return Err(UserStoreError::UserAlreadyExists);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user from Redis by username", skip_all)]
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        let mut conn = self.conn.clone();
        let id: Option<String> = conn
            .hget(USERNAME_INDEX_KEY, username.as_str())
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        self.user_from_index(id).await
    }

    #[tracing::instrument(name = "Retrieving user from Redis by email", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let mut conn = self.conn.clone();
        let id: Option<String> = conn
            .hget(EMAIL_INDEX_KEY, email.as_str())
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        self.user_from_index(id).await
    }

    #[tracing::instrument(name = "Retrieving user from Redis", skip_all)]
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let fields = self
            .read_hash(&user_key(&id.to_string()))
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if fields.is_empty() {
            return Err(UserStoreError::UserNotFound);
        }
        user_from_hash(&fields).map_err(UserStoreError::UnexpectedError)
    }
}

impl RedisStore {
    async fn user_from_index(&self, id: Option<String>) -> Result<User, UserStoreError> {
        let Some(id) = id else {
            return Err(UserStoreError::UserNotFound);
        };
        let id = UserId::parse(&id).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        self.get_user_by_id(&id).await
    }
}

#[async_trait::async_trait]
impl TodoStore for RedisStore {
    #[tracing::instrument(name = "Creating list in Redis", skip_all)]
    async fn create_list(&self, list: &TodoList) -> Result<ListId, TodoStoreError> {
        let items = serde_json::to_string(list.items())
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;
        let id = list.id().to_string();
        let fields = [
            ("id", id.clone()),
            ("createdAt", list.created_at().timestamp().to_string()),
            ("items", items),
        ];

        let mut conn = self.conn.clone();
        let _: () = conn
            .hset_multiple(list_key(&id), &fields)
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        Ok(list.id())
    }

    #[tracing::instrument(name = "Retrieving list from Redis", skip_all)]
    async fn get_list(&self, id: &ListId) -> Result<TodoList, TodoStoreError> {
        let fields = self
            .read_hash(&list_key(&id.to_string()))
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        if fields.is_empty() {
            return Err(TodoStoreError::ListNotFound);
        }
        list_from_hash(&fields).map_err(TodoStoreError::UnexpectedError)
    }

    async fn get_lists(&self) -> Result<Vec<TodoList>, TodoStoreError> {
        Err(TodoStoreError::Unimplemented("listing all lists"))
    }

    #[tracing::instrument(name = "Creating item in Redis", skip_all)]
    async fn create_item(&self, item: &Item) -> Result<ItemId, TodoStoreError> {
        let id = item.id().to_string();
        let fields = [
            ("id", id.clone()),
            ("createdAt", item.created_at().timestamp().to_string()),
            ("title", item.title().to_owned()),
            ("description", item.description().to_owned()),
            ("isDone", encode_bool(item.is_done()).to_owned()),
        ];

        let mut conn = self.conn.clone();
        let _: () = conn
            .hset_multiple(item_key(&id), &fields)
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        Ok(item.id())
    }

    #[tracing::instrument(name = "Retrieving item from Redis", skip_all)]
    async fn get_item(&self, id: &ItemId) -> Result<Item, TodoStoreError> {
        let fields = self
            .read_hash(&item_key(&id.to_string()))
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        if fields.is_empty() {
            return Err(TodoStoreError::ItemNotFound);
        }
        item_from_hash(&fields).map_err(TodoStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Updating item in Redis", skip_all)]
    async fn update_item(&self, id: &ItemId, item: &Item) -> Result<(), TodoStoreError> {
        let mut conn = self.conn.clone();
        let updated: i64 = UPDATE_ITEM
            .key(item_key(&id.to_string()))
            .arg(item.title())
            .arg(item.description())
            .arg(encode_bool(item.is_done()))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        if updated == 0 {
            return Err(TodoStoreError::ItemNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting item from Redis", skip_all)]
    async fn delete_item(&self, id: &ItemId) -> Result<(), TodoStoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .del(item_key(&id.to_string()))
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        if removed == 0 {
            return Err(TodoStoreError::DeleteFailed);
        }
        Ok(())
    }
}

fn user_key(id: &str) -> String {
    format!("{USER_KEY_PREFIX}{id}")
}

fn list_key(id: &str) -> String {
    format!("{LIST_KEY_PREFIX}{id}")
}

fn item_key(id: &str) -> String {
    format!("{ITEM_KEY_PREFIX}{id}")
}

fn encode_bool(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn field<'a>(fields: &'a HashMap<String, String>, name: &str) -> Result<&'a str, String> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| format!("stored record is missing field {name:?}"))
}

fn timestamp(fields: &HashMap<String, String>) -> Result<DateTime<Utc>, String> {
    let raw = field(fields, "createdAt")?;
    let seconds: i64 = raw
        .parse()
        .map_err(|_| format!("invalid createdAt {raw:?}"))?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| format!("createdAt out of range: {seconds}"))
}

fn user_from_hash(fields: &HashMap<String, String>) -> Result<User, String> {
    let id = UserId::parse(field(fields, "id")?).map_err(|e| e.to_string())?;
    let username = Username::parse(field(fields, "username")?).map_err(|e| e.to_string())?;
    let email = Email::parse(field(fields, "email")?).map_err(|e| e.to_string())?;
    let password_hash =
        HashedPassword::from_hash(Secret::new(field(fields, "hashedPassword")?.to_owned()))
            .map_err(|e| e.to_string())?;

    Ok(User::from_parts(
        id,
        timestamp(fields)?,
        username,
        email,
        password_hash,
    ))
}

fn list_from_hash(fields: &HashMap<String, String>) -> Result<TodoList, String> {
    let id = ListId::parse(field(fields, "id")?).map_err(|e| e.to_string())?;
    let items: Vec<Item> =
        serde_json::from_str(field(fields, "items")?).map_err(|e| e.to_string())?;
    Ok(TodoList::from_parts(id, timestamp(fields)?, items))
}

fn item_from_hash(fields: &HashMap<String, String>) -> Result<Item, String> {
    let id = ItemId::parse(field(fields, "id")?).map_err(|e| e.to_string())?;
    let is_done = match field(fields, "isDone")? {
        "1" => true,
        "0" => false,
        other => return Err(format!("invalid isDone {other:?}")),
    };

    Ok(Item::from_parts(
        id,
        timestamp(fields)?,
        field(fields, "title")?.to_owned(),
        field(fields, "description")?.to_owned(),
        is_done,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_keys_are_prefixed() {
        assert_eq!(user_key("abc"), "users:abc");
        assert_eq!(list_key("abc"), "lists:abc");
        assert_eq!(item_key("abc"), "items:abc");
    }

    #[test]
    fn test_item_from_hash() {
        let id = ItemId::new();
        let id_str = id.to_string();
        let fields = hash(&[
            ("id", &id_str),
            ("createdAt", "1700000000"),
            ("title", "Buy milk"),
            ("description", ""),
            ("isDone", "1"),
        ]);

        let item = item_from_hash(&fields).unwrap();
        assert_eq!(item.id(), id);
        assert_eq!(item.created_at().timestamp(), 1_700_000_000);
        assert_eq!(item.title(), "Buy milk");
        assert!(item.is_done());
    }

    #[test]
    fn test_item_from_hash_rejects_bad_flag() {
        let id = ItemId::new().to_string();
        let fields = hash(&[
            ("id", &id),
            ("createdAt", "1700000000"),
            ("title", "Buy milk"),
            ("description", ""),
            ("isDone", "maybe"),
        ]);

        assert!(item_from_hash(&fields).is_err());
    }

    #[test]
    fn test_list_from_hash_restores_items() {
        let list = TodoList::with_items(vec![Item::new("Buy milk", "").unwrap()]);
        let id = list.id().to_string();
        let created_at = list.created_at().timestamp().to_string();
        let items = serde_json::to_string(list.items()).unwrap();
        let fields = hash(&[("id", &id), ("createdAt", &created_at), ("items", &items)]);

        assert_eq!(list_from_hash(&fields).unwrap(), list);
    }

    #[test]
    fn test_missing_field_is_reported() {
        let id = UserId::new().to_string();
        let fields = hash(&[("id", &id)]);
        let err = user_from_hash(&fields).unwrap_err();
        assert_eq!(err, "stored record is missing field \"username\"");
    }
}
