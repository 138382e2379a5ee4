use todolist_core::{Item, ItemId, TodoStore};

use crate::error::TodoError;

/// Update item use case - overwrites title and description
pub struct UpdateItemUseCase<'a, S>
where
    S: TodoStore,
{
    store: &'a S,
}

impl<'a, S> UpdateItemUseCase<'a, S>
where
    S: TodoStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read, modify, write. Not atomic: a concurrent update of the same item
    /// between the read and the write is lost (last write wins).
    #[tracing::instrument(name = "UpdateItemUseCase::execute", skip(self, title, description))]
    pub async fn execute(
        &self,
        id: ItemId,
        title: String,
        description: String,
    ) -> Result<Item, TodoError> {
        let mut item = self.store.get_item(&id).await?;
        item.rename(title, description)?;
        self.store.update_item(&id, &item).await?;
        Ok(item)
    }
}
