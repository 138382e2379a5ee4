use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::now_in_seconds;

uuid_id!(ListId);
uuid_id!(ItemId);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Item title cannot be empty")]
    EmptyTitle,
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    created_at: DateTime<Utc>,
    title: String,
    description: String,
    is_done: bool,
}

impl Item {
    /// Creates an unfinished item with a fresh identity.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self, ItemError> {
        let title = validate_title(title.into())?;
        Ok(Self {
            id: ItemId::new(),
            created_at: now_in_seconds(),
            title,
            description: description.into(),
            is_done: false,
        })
    }

    /// Rebuilds an item that was read back from storage.
    pub fn from_parts(
        id: ItemId,
        created_at: DateTime<Utc>,
        title: String,
        description: String,
        is_done: bool,
    ) -> Self {
        Self {
            id,
            created_at,
            title,
            description,
            is_done,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// Overwrites title and description. The item is left untouched on error.
    pub fn rename(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), ItemError> {
        self.title = validate_title(title.into())?;
        self.description = description.into();
        Ok(())
    }

    pub fn set_done(&mut self, is_done: bool) {
        self.is_done = is_done;
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_done(&mut self) -> bool {
        self.is_done = !self.is_done;
        self.is_done
    }
}

fn validate_title(title: String) -> Result<String, ItemError> {
    if title.trim().is_empty() {
        return Err(ItemError::EmptyTitle);
    }
    Ok(title)
}

/// An ordered container of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    id: ListId,
    created_at: DateTime<Utc>,
    items: Vec<Item>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            id: ListId::new(),
            created_at: now_in_seconds(),
            items,
        }
    }

    pub fn from_parts(id: ListId, created_at: DateTime<Utc>, items: Vec<Item>) -> Self {
        Self {
            id,
            created_at,
            items,
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_not_done() {
        let item = Item::new("Buy milk", "").unwrap();
        assert_eq!(item.title(), "Buy milk");
        assert_eq!(item.description(), "");
        assert!(!item.is_done());
        assert_eq!(item.created_at().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_empty_title_is_rejected() {
        assert_eq!(Item::new("", "desc"), Err(ItemError::EmptyTitle));
        assert_eq!(Item::new("   ", "desc"), Err(ItemError::EmptyTitle));
    }

    #[test]
    fn test_rename_keeps_item_on_error() {
        let mut item = Item::new("Buy milk", "two litres").unwrap();

        assert_eq!(item.rename("", "nothing"), Err(ItemError::EmptyTitle));
        assert_eq!(item.title(), "Buy milk");
        assert_eq!(item.description(), "two litres");

        item.rename("Buy oat milk", "").unwrap();
        assert_eq!(item.title(), "Buy oat milk");
        assert_eq!(item.description(), "");
    }

    #[test]
    fn test_toggle_done_returns_new_state() {
        let mut item = Item::new("Buy milk", "").unwrap();
        assert!(item.toggle_done());
        assert!(!item.toggle_done());
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item::new("Buy milk", "").unwrap();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["isDone"], false);
        assert_eq!(json["id"], item.id().to_string());

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_list_keeps_item_order() {
        let first = Item::new("first", "").unwrap();
        let second = Item::new("second", "").unwrap();
        let mut list = TodoList::with_items(vec![first.clone()]);
        list.push(second.clone());

        assert_eq!(list.items(), &[first, second]);
    }
}
