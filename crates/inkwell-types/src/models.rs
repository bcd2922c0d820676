use chrono::{DateTime, Utc};

/// Position of an entry in the history. Assigned by the store, starting at 1.
pub type EntryId = i64;

/// Latest-id value reported by a store that holds no entries.
pub const EMPTY_ENTRY_ID: EntryId = 0;

/// Upper bound on entry length, counted in characters rather than bytes.
pub const MAX_CONTENT_CHARS: usize = 280;

/// Content written on first start so there is always something to show.
pub const BOOTSTRAP_CONTENT: &str = "Hello, World!";

/// A saved entry. Entries are never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Best-effort writer address, informational only.
    pub origin_address: String,
}
