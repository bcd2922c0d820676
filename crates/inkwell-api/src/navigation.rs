use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use inkwell_db::{EntryStore, StoreError};
use inkwell_types::{EntryId, View};
use thiserror::Error;

/// Display pattern for entry timestamps, e.g. "Jan 02, 2006 15:04:05 UTC".
pub const TIMESTAMP_FORMAT: &str = "%b %d, %Y %H:%M:%S %Z";

#[derive(Debug, Error)]
pub enum NavError {
    /// Requested position is outside `1..=latest`.
    #[error("no entry at position {requested} (latest is {latest})")]
    NotFound { requested: EntryId, latest: EntryId },

    /// Position passed the bounds check but the entry could not be read.
    #[error("entry {id} is in range but unreadable: {source}")]
    Inconsistent {
        id: EntryId,
        #[source]
        source: StoreError,
    },
}

/// Turns requested positions into bounds-checked views of the entry log.
pub struct Navigator<S> {
    store: Arc<S>,
    zone: Tz,
}

impl<S> Clone for Navigator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            zone: self.zone,
        }
    }
}

impl<S: EntryStore> Navigator<S> {
    pub fn new(store: Arc<S>, zone: Tz) -> Self {
        Self { store, zone }
    }

    pub fn resolve(&self, requested: EntryId, editing: bool) -> Result<View, NavError> {
        let latest = self.store.latest_id();
        if requested < 1 || requested > latest {
            return Err(NavError::NotFound { requested, latest });
        }

        let entry = self
            .store
            .get_by_id(requested)
            .map_err(|source| NavError::Inconsistent {
                id: requested,
                source,
            })?;

        Ok(View {
            content: entry.content,
            timestamp: self.format_timestamp(entry.created_at),
            editing,
            previous: (requested > 1).then_some(requested - 1),
            next: (requested < latest).then_some(requested + 1),
            edit_target: requested,
            current_index: requested,
            total_count: latest,
        })
    }

    /// Where a bare root request should land. An empty log yields the empty
    /// sentinel, which then resolves to not-found.
    pub fn latest_redirect_target(&self) -> EntryId {
        self.store.latest_id()
    }

    pub fn format_timestamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.zone).format(TIMESTAMP_FORMAT).to_string()
    }
}
