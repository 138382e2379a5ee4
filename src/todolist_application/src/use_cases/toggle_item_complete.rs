use todolist_core::{ItemId, TodoStore};

use crate::error::TodoError;

/// Toggle item use case - flips the completion flag
pub struct ToggleItemCompleteUseCase<'a, S>
where
    S: TodoStore,
{
    store: &'a S,
}

impl<'a, S> ToggleItemCompleteUseCase<'a, S>
where
    S: TodoStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns the new completion flag. Same last-write-wins caveat as
    /// updating an item.
    #[tracing::instrument(name = "ToggleItemCompleteUseCase::execute", skip(self))]
    pub async fn execute(&self, id: ItemId) -> Result<bool, TodoError> {
        let mut item = self.store.get_item(&id).await?;
        let is_done = item.toggle_done();
        self.store.update_item(&id, &item).await?;
        Ok(is_done)
    }
}
