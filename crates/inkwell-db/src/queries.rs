use chrono::{SecondsFormat, Utc};
use inkwell_types::{BOOTSTRAP_CONTENT, EMPTY_ENTRY_ID, Entry, EntryId};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::EntryRow;

/// Origin recorded for entries the server writes itself.
pub const SYSTEM_ORIGIN: &str = "system";

impl Database {
    /// Append a new entry and return the id SQLite assigned to it.
    ///
    /// Content must already be validated. The insert runs in its own
    /// transaction, so a failed write leaves no row behind and does not
    /// advance the id sequence.
    pub fn append_entry(&self, content: &str, origin_address: &str) -> StoreResult<EntryId> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        self.with_conn_mut(|conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute(
                "INSERT INTO entries (content, created_at, ip_address) VALUES (?1, ?2, ?3)",
                rusqlite::params![content, created_at, origin_address],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
    }

    pub fn get_entry(&self, id: EntryId) -> StoreResult<Entry> {
        self.with_conn(|conn| query_entry(conn, id))?
            .ok_or(StoreError::NotFound(id))?
            .into_entry()
    }

    /// Highest assigned id, or `EMPTY_ENTRY_ID` for an empty log.
    ///
    /// Best-effort: any storage failure is logged and reported as an empty
    /// log. Use [`Database::try_latest_entry_id`] to tell the two apart.
    pub fn latest_entry_id(&self) -> EntryId {
        self.try_latest_entry_id().unwrap_or_else(|e| {
            warn!("Latest id unavailable, treating log as empty: {}", e);
            EMPTY_ENTRY_ID
        })
    }

    pub fn try_latest_entry_id(&self) -> StoreResult<EntryId> {
        self.with_conn(|conn| {
            let id: EntryId =
                conn.query_row("SELECT COALESCE(MAX(id), 0) FROM entries", [], |row| row.get(0))?;
            Ok(id)
        })
    }

    /// Write the bootstrap entry if the log is empty. Returns its id when one
    /// was written.
    pub fn seed_if_empty(&self) -> StoreResult<Option<EntryId>> {
        if self.latest_entry_id() != EMPTY_ENTRY_ID {
            return Ok(None);
        }

        let id = self.append_entry(BOOTSTRAP_CONTENT, SYSTEM_ORIGIN)?;
        info!("Seeded empty history with bootstrap entry {}", id);
        Ok(Some(id))
    }
}

fn query_entry(conn: &Connection, id: EntryId) -> StoreResult<Option<EntryRow>> {
    let mut stmt =
        conn.prepare("SELECT id, content, created_at, ip_address FROM entries WHERE id = ?1")?;

    let row = stmt
        .query_row([id], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                content: row.get(1)?,
                created_at: row.get(2)?,
                ip_address: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> StoreResult<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> StoreResult<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn empty_log_reports_sentinel() {
        let db = fresh();
        assert_eq!(db.latest_entry_id(), EMPTY_ENTRY_ID);
        assert_eq!(db.try_latest_entry_id().unwrap(), 0);
    }

    #[test]
    fn ids_increase_by_one_from_one() {
        let db = fresh();
        for expected in 1..=5 {
            let id = db.append_entry(&format!("entry {}", expected), "10.0.0.1").unwrap();
            assert_eq!(id, expected);
            assert_eq!(db.latest_entry_id(), expected);
        }
    }

    #[test]
    fn append_then_get_returns_same_content() {
        let db = fresh();
        let long: String = "é".repeat(280);
        for content in ["a", "hello", "日本語のテキスト 🎉", long.as_str()] {
            let id = db.append_entry(content, "1.2.3.4").unwrap();
            let entry = db.get_entry(id).unwrap();
            assert_eq!(entry.id, id);
            assert_eq!(entry.content, content);
            assert_eq!(entry.origin_address, "1.2.3.4");
            assert!(!entry.created_at.to_rfc3339().is_empty());
        }
    }

    #[test]
    fn created_at_is_taken_at_append_time() {
        let db = fresh();
        let before = Utc::now();
        let id = db.append_entry("now", "1.2.3.4").unwrap();
        let after = Utc::now();

        let created = db.get_entry(id).unwrap().created_at;
        assert!(created >= before - chrono::Duration::milliseconds(1));
        assert!(created <= after);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let db = fresh();
        db.append_entry("one", "1.2.3.4").unwrap();

        for id in [0, -1, 2, 1000] {
            let err = db.get_entry(id).unwrap_err();
            assert!(err.is_not_found(), "id {} gave {:?}", id, err);
        }
    }

    #[test]
    fn failed_write_does_not_advance_ids() {
        let db = fresh();
        db.with_conn_mut(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER reject_boom BEFORE INSERT ON entries
                 WHEN NEW.content = 'boom'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )?;
            Ok(())
        })
        .unwrap();

        assert_eq!(db.append_entry("first", "a").unwrap(), 1);
        let err = db.append_entry("boom", "a").unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(db.latest_entry_id(), 1);
        assert_eq!(db.append_entry("second", "a").unwrap(), 2);
    }

    #[test]
    fn latest_id_degrades_to_sentinel_on_storage_failure() {
        let db = fresh();
        db.append_entry("one", "a").unwrap();
        db.with_conn_mut(|conn| {
            conn.execute_batch("DROP TABLE entries;")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(db.latest_entry_id(), EMPTY_ENTRY_ID);
        assert!(db.try_latest_entry_id().is_err());
    }

    #[test]
    fn seeding_happens_only_on_empty_log() {
        let db = fresh();
        assert_eq!(db.seed_if_empty().unwrap(), Some(1));
        assert_eq!(db.seed_if_empty().unwrap(), None);
        assert_eq!(db.latest_entry_id(), 1);

        let entry = db.get_entry(1).unwrap();
        assert_eq!(entry.content, BOOTSTRAP_CONTENT);
        assert_eq!(entry.origin_address, SYSTEM_ORIGIN);

        assert_eq!(db.append_entry("hello", "1.2.3.4").unwrap(), 2);
        assert_eq!(db.get_entry(2).unwrap().content, "hello");
    }

    #[test]
    fn reopening_a_file_keeps_the_log() {
        let dir = std::env::temp_dir().join(format!("inkwell_db_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("history.db");

        {
            let db = Database::open(&path).unwrap();
            db.seed_if_empty().unwrap();
            db.append_entry("kept", "1.2.3.4").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.seed_if_empty().unwrap(), None);
        assert_eq!(db.latest_entry_id(), 2);
        assert_eq!(db.get_entry(2).unwrap().content, "kept");

        drop(db);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn concurrent_appends_get_distinct_gap_free_ids() {
        use std::sync::Arc;
        use std::thread;

        const WRITERS: usize = 4;
        const PER_WRITER: usize = 25;

        let dir = std::env::temp_dir().join(format!("inkwell_db_concurrent_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let db = Arc::new(Database::open(&dir.join("history.db")).unwrap());

        let writers: Vec<_> = (0..WRITERS)
            .map(|w| {
                let db = db.clone();
                thread::spawn(move || {
                    (0..PER_WRITER)
                        .map(|i| {
                            let content = format!("writer {} entry {}", w, i);
                            let id = db.append_entry(&content, "10.0.0.1").unwrap();
                            (id, content)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        // Readers only ever see fully written entries while appends run.
        let readers: Vec<_> = (0..2)
            .map(|_| {
                let db = db.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let latest = db.latest_entry_id();
                        if latest > 0 {
                            let entry = db.get_entry(latest).unwrap();
                            assert_eq!(entry.id, latest);
                            assert!(entry.content.starts_with("writer "));
                        }
                    }
                })
            })
            .collect();

        let mut written: Vec<(EntryId, String)> = writers
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        for h in readers {
            h.join().unwrap();
        }

        written.sort();
        let total = (WRITERS * PER_WRITER) as EntryId;
        let ids: Vec<EntryId> = written.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, (1..=total).collect::<Vec<_>>());
        assert_eq!(db.latest_entry_id(), total);
        for (id, content) in &written {
            assert_eq!(&db.get_entry(*id).unwrap().content, content);
        }

        drop(db);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
