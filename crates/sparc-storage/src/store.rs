use std::future::Future;
use std::pin::Pin;

use uuid::Uuid;

use sparc_core::models::time_entry::TimeEntry;
use sparc_instruments::instruments::olbi::BurnoutSurveyResponse;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Row-level access to a user's time entries.
///
/// Mirrors what the hosted backend offers: whole-row reads and writes scoped
/// to one user. Validation and timestamps are the caller's job.
///
/// Methods return boxed futures for dyn compatibility.
pub trait EntryStore: Send + Sync {
    /// All entries for `user_id`, newest `occurred_on` first, ties broken by
    /// newest `created_at`.
    fn list<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Vec<TimeEntry>, StorageError>>;

    fn get<'a>(
        &'a self,
        user_id: &'a str,
        id: Uuid,
    ) -> BoxFuture<'a, Result<TimeEntry, StorageError>>;

    /// Insert new rows. Fails without writing anything if any id exists.
    fn insert<'a>(
        &'a self,
        user_id: &'a str,
        entries: Vec<TimeEntry>,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Overwrite existing rows by id. Fails without writing anything if any
    /// id is missing.
    fn replace<'a>(
        &'a self,
        user_id: &'a str,
        entries: Vec<TimeEntry>,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Delete rows by id. Unknown ids are ignored; returns how many rows
    /// were removed.
    fn delete<'a>(
        &'a self,
        user_id: &'a str,
        ids: &'a [Uuid],
    ) -> BoxFuture<'a, Result<usize, StorageError>>;
}

/// Survey answers persisted against a user's profile.
pub trait SurveyStore: Send + Sync {
    /// Replace the user's stored responses.
    fn save_responses<'a>(
        &'a self,
        user_id: &'a str,
        responses: Vec<BurnoutSurveyResponse>,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// `Ok(None)` if the user has never submitted the survey.
    fn load_responses<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Vec<BurnoutSurveyResponse>>, StorageError>>;
}
