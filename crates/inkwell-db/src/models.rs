//! Database row types. These map directly to SQLite rows and are kept apart
//! from the shared domain types so the storage format can change on its own.

use chrono::{DateTime, NaiveDateTime, Utc};
use inkwell_types::{Entry, EntryId};

use crate::error::{StoreError, StoreResult};

pub struct EntryRow {
    pub id: EntryId,
    pub content: String,
    pub created_at: String,
    pub ip_address: String,
}

impl EntryRow {
    pub fn into_entry(self) -> StoreResult<Entry> {
        let created_at = parse_timestamp(&self.created_at).ok_or_else(|| StoreError::CorruptRow {
            id: self.id,
            reason: format!("unreadable created_at '{}'", self.created_at),
        })?;

        Ok(Entry {
            id: self.id,
            content: self.content,
            created_at,
            origin_address: self.ip_address,
        })
    }
}

/// Timestamps are written as RFC 3339 in UTC. Rows written by SQLite's own
/// `datetime('now')` come back as "YYYY-MM-DD HH:MM:SS", also UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .ok()
}
