use std::fmt;
use std::str::FromStr;

use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sparc_core::models::time_entry::TimeEntry;

use crate::error::ExportError;

/// Which entries an export covers, relative to the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExportRange {
    Today,
    /// The seven days ending on (and including) today.
    Week,
    All,
}

impl ExportRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportRange::Today => "today",
            ExportRange::Week => "week",
            ExportRange::All => "all",
        }
    }

    pub fn contains(&self, date: Date, today: Date) -> bool {
        match self {
            ExportRange::Today => date == today,
            ExportRange::Week => match today.checked_sub(6.days()) {
                Ok(start) => date >= start && date <= today,
                Err(_) => date <= today,
            },
            ExportRange::All => true,
        }
    }
}

impl fmt::Display for ExportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportRange {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(ExportRange::Today),
            "week" => Ok(ExportRange::Week),
            "all" => Ok(ExportRange::All),
            other => Err(ExportError::Unknown {
                kind: "range",
                value: other.to_string(),
            }),
        }
    }
}

/// Entries inside `range`, in their original order.
pub fn filter_range(entries: &[TimeEntry], range: ExportRange, today: Date) -> Vec<TimeEntry> {
    entries
        .iter()
        .filter(|e| range.contains(e.occurred_on, today))
        .cloned()
        .collect()
}
