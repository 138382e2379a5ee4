use todolist_core::{Item, ItemId, ListId, TodoList, TodoStore};

use crate::{
    error::TodoError,
    use_cases::{
        seed_demo_list::SeedDemoListUseCase, toggle_item_complete::ToggleItemCompleteUseCase,
        update_item::UpdateItemUseCase,
    },
};

/// Entry point for list and item operations.
///
/// Lists and items arrive with their identity already assigned by
/// `TodoList::new` / `Item::new`; this service only persists and reads them.
#[derive(Clone)]
pub struct TodoService<S> {
    store: S,
}

impl<S> TodoService<S>
where
    S: TodoStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_list(&self, list: &TodoList) -> Result<ListId, TodoError> {
        Ok(self.store.create_list(list).await?)
    }

    pub async fn get_list(&self, id: ListId) -> Result<TodoList, TodoError> {
        Ok(self.store.get_list(&id).await?)
    }

    /// Always `Unimplemented` for now; kept so callers can tell "not built"
    /// apart from "no lists".
    pub async fn get_lists(&self) -> Result<Vec<TodoList>, TodoError> {
        Ok(self.store.get_lists().await?)
    }

    pub async fn create_item(&self, item: &Item) -> Result<ItemId, TodoError> {
        Ok(self.store.create_item(item).await?)
    }

    pub async fn get_item(&self, id: ItemId) -> Result<Item, TodoError> {
        Ok(self.store.get_item(&id).await?)
    }

    pub async fn update_item(
        &self,
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Item, TodoError> {
        UpdateItemUseCase::new(&self.store)
            .execute(id, title.into(), description.into())
            .await
    }

    pub async fn toggle_item_complete(&self, id: ItemId) -> Result<bool, TodoError> {
        ToggleItemCompleteUseCase::new(&self.store).execute(id).await
    }

    pub async fn delete_item(&self, id: ItemId) -> Result<(), TodoError> {
        Ok(self.store.delete_item(&id).await?)
    }

    pub async fn seed_demo_list(&self) -> Result<TodoList, TodoError> {
        SeedDemoListUseCase::new(&self.store).execute().await
    }
}
