use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use sparc_core::models::time_entry::TimeEntry;
use sparc_instruments::instruments::olbi::BurnoutSurveyResponse;

use crate::error::StorageError;
use crate::store::{BoxFuture, EntryStore, SurveyStore};

/// In-process store keyed by user id. Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<TimeEntry>>>>,
    surveys: Arc<Mutex<HashMap<String, Vec<BurnoutSurveyResponse>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `entries` for `user_id`, e.g. from an export
    /// or fixture file.
    pub fn with_entries(user_id: &str, entries: Vec<TimeEntry>) -> Self {
        let map = HashMap::from([(user_id.to_string(), entries)]);
        Self {
            entries: Arc::new(Mutex::new(map)),
            surveys: Arc::default(),
        }
    }
}

impl EntryStore for MemoryStore {
    fn list<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Vec<TimeEntry>, StorageError>> {
        Box::pin(async move {
            let map = self.entries.lock().await;
            let mut entries = map.get(user_id).cloned().unwrap_or_default();
            entries.sort_by(|a, b| {
                b.occurred_on
                    .cmp(&a.occurred_on)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            });
            Ok(entries)
        })
    }

    fn get<'a>(
        &'a self,
        user_id: &'a str,
        id: Uuid,
    ) -> BoxFuture<'a, Result<TimeEntry, StorageError>> {
        Box::pin(async move {
            let map = self.entries.lock().await;
            map.get(user_id)
                .and_then(|entries| entries.iter().find(|e| e.id == id))
                .cloned()
                .ok_or(StorageError::NotFound { id })
        })
    }

    fn insert<'a>(
        &'a self,
        user_id: &'a str,
        entries: Vec<TimeEntry>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut map = self.entries.lock().await;
            let rows = map.entry(user_id.to_string()).or_default();
            if let Some(dup) = entries.iter().find(|e| rows.iter().any(|r| r.id == e.id)) {
                return Err(StorageError::AlreadyExists { id: dup.id });
            }
            tracing::debug!(user_id, count = entries.len(), "inserting time entries");
            rows.extend(entries);
            Ok(())
        })
    }

    fn replace<'a>(
        &'a self,
        user_id: &'a str,
        entries: Vec<TimeEntry>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut map = self.entries.lock().await;
            let rows = map.entry(user_id.to_string()).or_default();
            if let Some(missing) = entries.iter().find(|e| !rows.iter().any(|r| r.id == e.id)) {
                return Err(StorageError::NotFound { id: missing.id });
            }
            tracing::debug!(user_id, count = entries.len(), "replacing time entries");
            for entry in entries {
                if let Some(row) = rows.iter_mut().find(|r| r.id == entry.id) {
                    *row = entry;
                }
            }
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        user_id: &'a str,
        ids: &'a [Uuid],
    ) -> BoxFuture<'a, Result<usize, StorageError>> {
        Box::pin(async move {
            let mut map = self.entries.lock().await;
            let Some(rows) = map.get_mut(user_id) else {
                return Ok(0);
            };
            let before = rows.len();
            rows.retain(|r| !ids.contains(&r.id));
            let removed = before - rows.len();
            tracing::debug!(user_id, removed, "deleted time entries");
            Ok(removed)
        })
    }
}

impl SurveyStore for MemoryStore {
    fn save_responses<'a>(
        &'a self,
        user_id: &'a str,
        responses: Vec<BurnoutSurveyResponse>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.surveys
                .lock()
                .await
                .insert(user_id.to_string(), responses);
            Ok(())
        })
    }

    fn load_responses<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Vec<BurnoutSurveyResponse>>, StorageError>> {
        Box::pin(async move { Ok(self.surveys.lock().await.get(user_id).cloned()) })
    }
}
