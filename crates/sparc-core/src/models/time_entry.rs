use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use super::task::TaskCode;
use crate::error::CoreError;

/// Upper bound for a single entry. Longer spans must be split across days.
pub const MAX_MINUTES_PER_ENTRY: u32 = 24 * 60;

/// A discrete block of logged work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeEntry {
    pub id: Uuid,
    pub task: TaskCode,
    /// Free-text label; only ever set when `task` is [`TaskCode::Other`].
    pub other_task: Option<String>,
    pub minutes: u32,
    pub occurred_on: jiff::civil::Date,
    pub comment: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// Quick-log input for a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewTimeEntry {
    pub task: TaskCode,
    #[serde(default)]
    pub other_task: Option<String>,
    pub minutes: u32,
    pub occurred_on: jiff::civil::Date,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Partial edit applied to one or many entries. `None` keeps the current
/// value; an empty string clears an optional text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeEntryPatch {
    #[serde(default)]
    pub task: Option<TaskCode>,
    #[serde(default)]
    pub other_task: Option<String>,
    #[serde(default)]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub occurred_on: Option<jiff::civil::Date>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum EntryProblem {
    #[error("a label is required when the task is OTHER")]
    MissingOtherLabel,

    #[error("{minutes} minutes exceeds the 1440 minute limit for one entry")]
    TooManyMinutes { minutes: u32 },
}

impl NewTimeEntry {
    /// Check the quick-log invariants. An empty vector means the entry is valid.
    pub fn validate(&self) -> Vec<EntryProblem> {
        check(self.task, self.other_task.as_deref(), self.minutes)
    }
}

impl TimeEntry {
    /// Build a fresh entry from quick-log input, stamping both timestamps
    /// with `now`.
    pub fn create(new: NewTimeEntry, now: jiff::Timestamp) -> Result<Self, CoreError> {
        let problems = new.validate();
        if !problems.is_empty() {
            return Err(CoreError::InvalidEntry(problems));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            task: new.task,
            other_task: normalize_other(new.task, new.other_task),
            minutes: new.minutes,
            occurred_on: new.occurred_on,
            comment: normalize_text(new.comment),
            created_at: now,
            updated_at: now,
        })
    }

    /// Copy of this entry under a new id with fresh timestamps.
    pub fn duplicate(&self, now: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Apply an edit. The entry is left untouched if the result would be
    /// invalid.
    pub fn apply_patch(
        &mut self,
        patch: &TimeEntryPatch,
        now: jiff::Timestamp,
    ) -> Result<(), CoreError> {
        let task = patch.task.unwrap_or(self.task);
        let other_task = match &patch.other_task {
            Some(label) => normalize_text(Some(label.clone())),
            None => self.other_task.clone(),
        };
        let minutes = patch.minutes.unwrap_or(self.minutes);

        let problems = check(task, other_task.as_deref(), minutes);
        if !problems.is_empty() {
            return Err(CoreError::InvalidEntry(problems));
        }

        self.task = task;
        self.other_task = normalize_other(task, other_task);
        self.minutes = minutes;
        if let Some(date) = patch.occurred_on {
            self.occurred_on = date;
        }
        if let Some(comment) = &patch.comment {
            self.comment = normalize_text(Some(comment.clone()));
        }
        self.updated_at = now;
        Ok(())
    }
}

fn check(task: TaskCode, other_task: Option<&str>, minutes: u32) -> Vec<EntryProblem> {
    let mut problems = Vec::new();
    if task == TaskCode::Other && other_task.is_none_or(|s| s.trim().is_empty()) {
        problems.push(EntryProblem::MissingOtherLabel);
    }
    if minutes > MAX_MINUTES_PER_ENTRY {
        problems.push(EntryProblem::TooManyMinutes { minutes });
    }
    problems
}

fn normalize_other(task: TaskCode, other_task: Option<String>) -> Option<String> {
    match task {
        TaskCode::Other => normalize_text(other_task),
        _ => None,
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
