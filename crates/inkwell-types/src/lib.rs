pub mod models;
pub mod view;

pub use models::{BOOTSTRAP_CONTENT, EMPTY_ENTRY_ID, Entry, EntryId, MAX_CONTENT_CHARS};
pub use view::{View, entry_path};
