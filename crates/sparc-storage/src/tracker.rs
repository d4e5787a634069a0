use std::sync::Arc;

use jiff::civil::Date;
use serde_json::json;
use uuid::Uuid;

use sparc_audit::events::AuditEvent;
use sparc_audit::telemetry::Telemetry;
use sparc_core::aggregate::{self, DailyTotals};
use sparc_core::models::time_entry::{NewTimeEntry, TimeEntry, TimeEntryPatch};
use sparc_export::file::{self, ExportFile, ExportFormat, ExportOptions};
use sparc_export::range::ExportRange;
use sparc_instruments::instruments::olbi::{self, BurnoutSurveyResponse, BurnoutSurveyScores};

use crate::error::StorageError;
use crate::store::{EntryStore, SurveyStore};

const ENTRY: &str = "time_entry";
const SURVEY: &str = "burnout_survey";

/// One signed-in user's view of their time entries and survey.
///
/// Built once per session with the stores and the telemetry handle it
/// should use.
pub struct TimeTracker {
    user_id: String,
    entries: Arc<dyn EntryStore>,
    surveys: Arc<dyn SurveyStore>,
    telemetry: Telemetry,
}

impl TimeTracker {
    pub fn new(
        user_id: impl Into<String>,
        entries: Arc<dyn EntryStore>,
        surveys: Arc<dyn SurveyStore>,
        telemetry: Telemetry,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            entries,
            surveys,
            telemetry,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub async fn entries(&self) -> Result<Vec<TimeEntry>, StorageError> {
        self.entries.list(&self.user_id).await
    }

    pub async fn quick_log(&self, new: NewTimeEntry) -> Result<TimeEntry, StorageError> {
        let entry = TimeEntry::create(new, jiff::Timestamp::now())?;
        self.entries
            .insert(&self.user_id, vec![entry.clone()])
            .await?;
        self.telemetry.record(
            AuditEvent::new("create", ENTRY, entry.id.to_string())
                .with_details(json!({ "task": entry.task, "minutes": entry.minutes })),
        );
        Ok(entry)
    }

    pub async fn edit(&self, id: Uuid, patch: &TimeEntryPatch) -> Result<TimeEntry, StorageError> {
        let mut updated = self.bulk_update(&[id], patch).await?;
        updated.pop().ok_or(StorageError::NotFound { id })
    }

    /// Apply `patch` to every entry in `ids`. Nothing is written unless the
    /// patch is valid for all of them.
    pub async fn bulk_update(
        &self,
        ids: &[Uuid],
        patch: &TimeEntryPatch,
    ) -> Result<Vec<TimeEntry>, StorageError> {
        let now = jiff::Timestamp::now();
        let mut updated = Vec::with_capacity(ids.len());
        for id in ids {
            let mut entry = self.entries.get(&self.user_id, *id).await?;
            entry.apply_patch(patch, now)?;
            updated.push(entry);
        }

        self.entries.replace(&self.user_id, updated.clone()).await?;
        for entry in &updated {
            self.telemetry
                .record(AuditEvent::new("update", ENTRY, entry.id.to_string()));
        }
        Ok(updated)
    }

    /// Copy each entry in `ids` under a new id, optionally moving the copies
    /// to `onto`.
    pub async fn duplicate(
        &self,
        ids: &[Uuid],
        onto: Option<Date>,
    ) -> Result<Vec<TimeEntry>, StorageError> {
        let now = jiff::Timestamp::now();
        let mut copies = Vec::with_capacity(ids.len());
        for id in ids {
            let mut copy = self.entries.get(&self.user_id, *id).await?.duplicate(now);
            if let Some(date) = onto {
                copy.occurred_on = date;
            }
            copies.push(copy);
        }

        self.entries.insert(&self.user_id, copies.clone()).await?;
        for (source, copy) in ids.iter().zip(&copies) {
            self.telemetry.record(
                AuditEvent::new("duplicate", ENTRY, copy.id.to_string())
                    .with_details(json!({ "source": source })),
            );
        }
        Ok(copies)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        match self.bulk_delete(&[id]).await? {
            0 => Err(StorageError::NotFound { id }),
            _ => Ok(()),
        }
    }

    /// Delete every entry in `ids`, returning how many existed.
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<usize, StorageError> {
        let removed = self.entries.delete(&self.user_id, ids).await?;
        self.telemetry.record(
            AuditEvent::new("delete", ENTRY, join_ids(ids))
                .with_details(json!({ "requested": ids.len(), "removed": removed })),
        );
        Ok(removed)
    }

    pub async fn daily_totals(&self, date: Date) -> Result<DailyTotals, StorageError> {
        let entries = self.entries().await?;
        Ok(aggregate::daily_totals(&entries, date))
    }

    pub async fn export(
        &self,
        format: ExportFormat,
        range: ExportRange,
        today: Date,
        options: &ExportOptions,
    ) -> Result<ExportFile, StorageError> {
        let entries = self.entries().await?;
        let exported = file::export(&entries, format, range, today, options)?;
        self.telemetry.record(
            AuditEvent::new("export", "time_entries", exported.filename.clone())
                .with_details(json!({ "format": format, "range": range })),
        );
        Ok(exported)
    }

    /// Validate and store a complete answer set, returning its scores.
    /// Invalid sets are rejected before anything is stored.
    pub async fn submit_survey(
        &self,
        responses: Vec<BurnoutSurveyResponse>,
    ) -> Result<BurnoutSurveyScores, StorageError> {
        let scores = olbi::score(&responses)?;
        self.surveys.save_responses(&self.user_id, responses).await?;
        self.telemetry.record(
            AuditEvent::new("submit", SURVEY, self.user_id.clone())
                .with_details(json!({ "total_average": scores.total_average })),
        );
        Ok(scores)
    }

    /// Scores for the stored answer set, recomputed on every call.
    pub async fn survey_scores(&self) -> Result<BurnoutSurveyScores, StorageError> {
        let responses = self
            .surveys
            .load_responses(&self.user_id)
            .await?
            .ok_or_else(|| StorageError::NoSurvey {
                user_id: self.user_id.clone(),
            })?;
        Ok(olbi::score(&responses)?)
    }
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
