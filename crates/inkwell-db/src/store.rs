use inkwell_types::{Entry, EntryId};

use crate::Database;
use crate::error::StoreResult;

/// The append-only entry log as seen by the navigation and save paths.
pub trait EntryStore: Send + Sync + 'static {
    /// Persist `content` and return its newly assigned id.
    fn append(&self, content: &str, origin_address: &str) -> StoreResult<EntryId>;

    /// Fetch a previously assigned entry. Unassigned ids are `NotFound`.
    fn get_by_id(&self, id: EntryId) -> StoreResult<Entry>;

    /// Highest assigned id, or `EMPTY_ENTRY_ID`.
    ///
    /// This read never fails: storage errors are reported as an empty log so
    /// startup and the root redirect keep working while storage is degraded.
    fn latest_id(&self) -> EntryId;
}

impl EntryStore for Database {
    fn append(&self, content: &str, origin_address: &str) -> StoreResult<EntryId> {
        self.append_entry(content, origin_address)
    }

    fn get_by_id(&self, id: EntryId) -> StoreResult<Entry> {
        self.get_entry(id)
    }

    fn latest_id(&self) -> EntryId {
        self.latest_entry_id()
    }
}
