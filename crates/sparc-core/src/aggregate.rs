//! Per-day minute totals across the fixed activity categories.
//!
//! Dates are compared as calendar dates. An entry counts toward exactly the
//! day in its `occurred_on`, regardless of when it was created.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::task::TaskCode;
use crate::models::time_entry::TimeEntry;

/// Minutes per task code for a single day, plus the day's total.
///
/// Every task code is present; categories with nothing logged report 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyTotals {
    pub date: Date,
    #[ts(type = "Record<TaskCode, number>")]
    pub minutes: BTreeMap<TaskCode, u64>,
    #[ts(type = "number")]
    pub total: u64,
}

impl DailyTotals {
    /// All-zero totals for `date`.
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            minutes: TaskCode::ALL.into_iter().map(|t| (t, 0)).collect(),
            total: 0,
        }
    }

    pub fn get(&self, task: TaskCode) -> u64 {
        self.minutes.get(&task).copied().unwrap_or(0)
    }

    /// Task codes and minutes in [`TaskCode::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskCode, u64)> + '_ {
        self.minutes.iter().map(|(t, m)| (*t, *m))
    }

    fn add(&mut self, task: TaskCode, minutes: u32) {
        *self.minutes.entry(task).or_insert(0) += u64::from(minutes);
        self.total += u64::from(minutes);
    }
}

/// Sum minutes per task code for entries that occurred on `date`.
pub fn daily_totals<'a, I>(entries: I, date: Date) -> DailyTotals
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let mut totals = DailyTotals::empty(date);
    let mut counted = 0usize;
    for entry in entries.into_iter().filter(|e| e.occurred_on == date) {
        totals.add(entry.task, entry.minutes);
        counted += 1;
    }
    tracing::debug!(%date, counted, total = totals.total, "aggregated daily totals");
    totals
}

/// Totals for every date that has at least one entry, ascending by date.
pub fn totals_by_day<'a, I>(entries: I) -> BTreeMap<Date, DailyTotals>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let mut days: BTreeMap<Date, DailyTotals> = BTreeMap::new();
    for entry in entries {
        days.entry(entry.occurred_on)
            .or_insert_with(|| DailyTotals::empty(entry.occurred_on))
            .add(entry.task, entry.minutes);
    }
    days
}
