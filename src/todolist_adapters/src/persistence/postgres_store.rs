use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, migrate::MigrateError};
use todolist_core::{
    Email, HashedPassword, Item, ItemId, ListId, TodoList, TodoStore, TodoStoreError, User,
    UserId, UserStore, UserStoreError, Username,
};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `users`, `lists` and `items` tables if they are missing.
    #[tracing::instrument(name = "Running PostgreSQL migrations", skip_all)]
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    created_at: i64,
    username: String,
    email: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let unexpected = |e: String| UserStoreError::UnexpectedError(e);
        Ok(User::from_parts(
            UserId::parse(&row.id).map_err(|e| unexpected(e.to_string()))?,
            from_epoch(row.created_at).map_err(unexpected)?,
            Username::parse(row.username).map_err(|e| unexpected(e.to_string()))?,
            Email::parse(row.email).map_err(|e| unexpected(e.to_string()))?,
            HashedPassword::from_hash(Secret::new(row.password_hash))
                .map_err(|e| unexpected(e.to_string()))?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct ListRow {
    id: String,
    created_at: i64,
    items: String,
}

impl TryFrom<ListRow> for TodoList {
    type Error = TodoStoreError;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        let unexpected = |e: String| TodoStoreError::UnexpectedError(e);
        let items: Vec<Item> =
            serde_json::from_str(&row.items).map_err(|e| unexpected(e.to_string()))?;
        Ok(TodoList::from_parts(
            ListId::parse(&row.id).map_err(|e| unexpected(e.to_string()))?,
            from_epoch(row.created_at).map_err(unexpected)?,
            items,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    created_at: i64,
    title: String,
    description: String,
    is_done: bool,
}

impl TryFrom<ItemRow> for Item {
    type Error = TodoStoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let unexpected = |e: String| TodoStoreError::UnexpectedError(e);
        Ok(Item::from_parts(
            ItemId::parse(&row.id).map_err(|e| unexpected(e.to_string()))?,
            from_epoch(row.created_at).map_err(unexpected)?,
            row.title,
            row.description,
            row.is_done,
        ))
    }
}

fn from_epoch(seconds: i64) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| format!("created_at out of range: {seconds}"))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

const SELECT_USER: &str = "SELECT id, created_at, username, email, password_hash FROM users";

#[async_trait::async_trait]
impl UserStore for PostgresStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (id, created_at, username, email, password_hash)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().to_string())
        .bind(user.created_at().timestamp())
        .bind(user.username().as_str())
        .bind(user.email().as_str())
        .bind(user.password_hash().as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return UserStoreError::UserAlreadyExists;
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL by username", skip_all)]
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE username = $1"))
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL by email", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }
}

#[async_trait::async_trait]
impl TodoStore for PostgresStore {
    #[tracing::instrument(name = "Creating list in PostgreSQL", skip_all)]
    async fn create_list(&self, list: &TodoList) -> Result<ListId, TodoStoreError> {
        let items = serde_json::to_string(list.items())
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        sqlx::query("INSERT INTO lists (id, created_at, items) VALUES ($1, $2, $3)")
            .bind(list.id().to_string())
            .bind(list.created_at().timestamp())
            .bind(items)
            .execute(&self.pool)
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        Ok(list.id())
    }

    #[tracing::instrument(name = "Retrieving list from PostgreSQL", skip_all)]
    async fn get_list(&self, id: &ListId) -> Result<TodoList, TodoStoreError> {
        let row = sqlx::query_as::<_, ListRow>(
            "SELECT id, created_at, items FROM lists WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(TodoStoreError::ListNotFound)?.try_into()
    }

    async fn get_lists(&self) -> Result<Vec<TodoList>, TodoStoreError> {
        Err(TodoStoreError::Unimplemented("listing all lists"))
    }

    #[tracing::instrument(name = "Creating item in PostgreSQL", skip_all)]
    async fn create_item(&self, item: &Item) -> Result<ItemId, TodoStoreError> {
        sqlx::query(
            r#"
                INSERT INTO items (id, created_at, title, description, is_done)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id().to_string())
        .bind(item.created_at().timestamp())
        .bind(item.title())
        .bind(item.description())
        .bind(item.is_done())
        .execute(&self.pool)
        .await
        .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        Ok(item.id())
    }

    #[tracing::instrument(name = "Retrieving item from PostgreSQL", skip_all)]
    async fn get_item(&self, id: &ItemId) -> Result<Item, TodoStoreError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, created_at, title, description, is_done FROM items WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(TodoStoreError::ItemNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Updating item in PostgreSQL", skip_all)]
    async fn update_item(&self, id: &ItemId, item: &Item) -> Result<(), TodoStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE items
                SET title = $1, description = $2, is_done = $3
                WHERE id = $4
            "#,
        )
        .bind(item.title())
        .bind(item.description())
        .bind(item.is_done())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoStoreError::ItemNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting item from PostgreSQL", skip_all)]
    async fn delete_item(&self, id: &ItemId) -> Result<(), TodoStoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| TodoStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoStoreError::DeleteFailed);
        }
        Ok(())
    }
}
