use inkwell_types::EntryId;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No entry was ever assigned this id.
    #[error("entry not found: {0}")]
    NotFound(EntryId),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A stored row could not be turned back into an entry.
    #[error("corrupt row for entry {id}: {reason}")]
    CorruptRow { id: EntryId, reason: String },

    #[error("DB lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
