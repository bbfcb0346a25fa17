//! Completed-session counter.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{read_json, write_json, PersistenceStore, StorageError, PROGRESS_KEY};

/// Number of completed focus sessions and when the last phase completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounter {
    sessions_completed: u32,
    last_session: Option<DateTime<Utc>>,
}

impl ProgressCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed focus sessions.
    #[must_use]
    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// Timestamp written with the most recent save, if any.
    #[must_use]
    pub fn last_session(&self) -> Option<DateTime<Utc>> {
        self.last_session
    }

    /// Credits one completed focus session.
    pub fn increment(&mut self) {
        self.sessions_completed = self.sessions_completed.saturating_add(1);
    }

    /// Loads the counter; missing or malformed data yields zero.
    pub fn load_from(store: &dyn PersistenceStore) -> Self {
        let Some(record) = read_json(store, PROGRESS_KEY) else {
            return Self::default();
        };

        Self {
            sessions_completed: record
                .get("sessionsCompleted")
                .and_then(serde_json::Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0),
            last_session: record
                .get("lastSession")
                .and_then(serde_json::Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Stamps `now` as the last session and writes the progress record.
    ///
    /// The timestamp is kept in memory even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save_to(
        &mut self,
        store: &mut dyn PersistenceStore,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.last_session = Some(now);
        let record = ProgressRecord {
            sessions_completed: self.sessions_completed,
            last_session: format_timestamp(now),
        };
        write_json(store, PROGRESS_KEY, &record)
    }
}

/// On-disk shape of the progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub sessions_completed: u32,
    pub last_session: String,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
