//! Flat tabular view of time entries, shared by every export format.

use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sparc_core::models::time_entry::TimeEntry;

pub const COLUMNS: [&str; 7] = [
    "Date",
    "Task",
    "Other Task",
    "Minutes",
    "Comment",
    "Created At",
    "Updated At",
];

/// One typed value in the table. Each format decides how to render it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Date(Date),
    Timestamp(Timestamp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: [Cell; 7],
}

/// A time entry as a backend or backup file hands it out: every field a
/// loose string. Used when the record has not been through [`TimeEntry`]'s
/// typed deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawTimeEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub other_task: Option<String>,
    #[serde(default)]
    pub minutes: Option<serde_json::Value>,
    #[serde(default)]
    pub occurred_on: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TableRow {
    pub fn from_entry(entry: &TimeEntry) -> Self {
        Self {
            cells: [
                Cell::Date(entry.occurred_on),
                Cell::Text(entry.task.code().to_string()),
                text(entry.other_task.as_deref()),
                Cell::Integer(i64::from(entry.minutes)),
                text(entry.comment.as_deref()),
                Cell::Timestamp(entry.created_at),
                Cell::Timestamp(entry.updated_at),
            ],
        }
    }

    /// Build a row from loose strings. Values that fail to parse are kept
    /// verbatim rather than rejected.
    pub fn from_raw(entry: &RawTimeEntry) -> Self {
        Self {
            cells: [
                date_cell(entry.occurred_on.as_deref()),
                text(entry.task.as_deref()),
                text(entry.other_task.as_deref()),
                minutes_cell(entry.minutes.as_ref()),
                text(entry.comment.as_deref()),
                timestamp_cell(entry.created_at.as_deref()),
                timestamp_cell(entry.updated_at.as_deref()),
            ],
        }
    }
}

pub fn rows_from_entries(entries: &[TimeEntry]) -> Vec<TableRow> {
    entries.iter().map(TableRow::from_entry).collect()
}

pub fn rows_from_raw(entries: &[RawTimeEntry]) -> Vec<TableRow> {
    entries.iter().map(TableRow::from_raw).collect()
}

fn text(value: Option<&str>) -> Cell {
    match value {
        Some(s) => Cell::Text(s.to_string()),
        None => Cell::Empty,
    }
}

/// Accepts a plain calendar date or a full datetime string, which is
/// reduced to its calendar date.
fn date_cell(value: Option<&str>) -> Cell {
    let Some(raw) = value else {
        return Cell::Empty;
    };
    if let Ok(date) = raw.parse::<Date>() {
        return Cell::Date(date);
    }
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Cell::Date(ts.to_zoned(jiff::tz::TimeZone::UTC).date());
    }
    tracing::warn!(value = raw, "unparseable entry date, exporting as-is");
    Cell::Text(raw.to_string())
}

fn timestamp_cell(value: Option<&str>) -> Cell {
    let Some(raw) = value else {
        return Cell::Empty;
    };
    match raw.parse::<Timestamp>() {
        Ok(ts) => Cell::Timestamp(ts),
        Err(_) => {
            tracing::warn!(value = raw, "unparseable timestamp, exporting as-is");
            Cell::Text(raw.to_string())
        }
    }
}

fn minutes_cell(value: Option<&serde_json::Value>) -> Cell {
    match value {
        None | Some(serde_json::Value::Null) => Cell::Empty,
        Some(serde_json::Value::Number(n)) => match n.as_i64() {
            Some(i) => Cell::Integer(i),
            None => Cell::Text(n.to_string()),
        },
        Some(serde_json::Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(i) => Cell::Integer(i),
            Err(_) => Cell::Text(s.clone()),
        },
        Some(other) => Cell::Text(other.to_string()),
    }
}
