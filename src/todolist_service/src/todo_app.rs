use todolist_adapters::{JwtAuthConfig, JwtTokenIssuer};
use todolist_application::{TodoError, TodoService, UserService};
use todolist_core::{StoragePort, TodoList};

/// The wired application: both services sharing one storage backend.
///
/// `S` is any `StoragePort`; the backend is picked once at startup and the
/// services never know which one they got.
#[derive(Clone)]
pub struct TodoApp<S> {
    users: UserService<S, JwtTokenIssuer>,
    todos: TodoService<S>,
}

impl<S> TodoApp<S>
where
    S: StoragePort + Clone,
{
    pub fn new(store: S, jwt_config: JwtAuthConfig) -> Self {
        Self {
            users: UserService::new(store.clone(), JwtTokenIssuer::new(jwt_config)),
            todos: TodoService::new(store),
        }
    }

    pub fn users(&self) -> &UserService<S, JwtTokenIssuer> {
        &self.users
    }

    pub fn todos(&self) -> &TodoService<S> {
        &self.todos
    }

    /// Persists the demo list so a fresh install has something to show.
    #[tracing::instrument(name = "Seeding demo list", skip_all)]
    pub async fn seed(&self) -> Result<TodoList, TodoError> {
        let list = self.todos.seed_demo_list().await?;
        tracing::info!(list_id = %list.id(), items = list.items().len(), "Demo list created");
        Ok(list)
    }
}
