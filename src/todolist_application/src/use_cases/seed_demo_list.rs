use todolist_core::{Item, TodoList, TodoStore};

use crate::error::TodoError;

/// Seeds a list with a few sample items for first-time visitors
pub struct SeedDemoListUseCase<'a, S>
where
    S: TodoStore,
{
    store: &'a S,
}

impl<'a, S> SeedDemoListUseCase<'a, S>
where
    S: TodoStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Stores the list, then each item in order.
    ///
    /// Stops at the first failure. Whatever was stored before it stays
    /// stored; there is no rollback.
    #[tracing::instrument(name = "SeedDemoListUseCase::execute", skip_all)]
    pub async fn execute(&self) -> Result<TodoList, TodoError> {
        let list = demo_list()?;

        self.store.create_list(&list).await?;
        for item in list.items() {
            self.store.create_item(item).await?;
        }

        tracing::info!(list_id = %list.id(), items = list.items().len(), "Seeded demo list");
        Ok(list)
    }
}

fn demo_list() -> Result<TodoList, TodoError> {
    let mut lecture = Item::new(
        "Listen to CS lecture 240",
        "Take notes on Data structures & Algorithms",
    )?;
    lecture.set_done(true);

    Ok(TodoList::with_items(vec![
        Item::new("Write notes on Chemistry 1", "")?,
        lecture,
        Item::new("Study HTMX", "HTMX is the best!")?,
        Item::new("Finish Chapter 12 of the Rust book", "")?,
    ]))
}
