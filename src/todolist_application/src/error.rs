use thiserror::Error;
use todolist_core::{ErrorKind, ItemError, TodoStoreError};

/// Error returned by every list and item operation.
#[derive(Debug, Error, PartialEq)]
pub enum TodoError {
    #[error("Invalid item: {0}")]
    Validation(#[from] ItemError),
    #[error(transparent)]
    Store(#[from] TodoStoreError),
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) => ErrorKind::Validation,
            TodoError::Store(e) => e.kind(),
        }
    }
}
