use jiff::Timestamp;
use jiff::civil::{Date, date};
use uuid::Uuid;

use sparc_core::aggregate::{daily_totals, totals_by_day};
use sparc_core::models::task::TaskCode;
use sparc_core::models::time_entry::TimeEntry;

fn entry(task: TaskCode, minutes: u32, occurred_on: Date) -> TimeEntry {
    let now = Timestamp::from_second(1_736_935_200).unwrap();
    TimeEntry {
        id: Uuid::new_v4(),
        task,
        other_task: None,
        minutes,
        occurred_on,
        comment: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn only_entries_on_the_reference_date_count() {
    let entries = vec![
        entry(TaskCode::Paf, 15, date(2025, 1, 15)),
        entry(TaskCode::Paf, 10, date(2025, 1, 14)),
    ];

    let totals = daily_totals(&entries, date(2025, 1, 15));
    assert_eq!(totals.get(TaskCode::Paf), 15);
    assert_eq!(totals.total, 15);
    for task in TaskCode::ALL.into_iter().filter(|t| *t != TaskCode::Paf) {
        assert_eq!(totals.get(task), 0, "{task} should be zero");
    }
}

#[test]
fn empty_input_reports_every_category_at_zero() {
    let entries: Vec<TimeEntry> = Vec::new();
    let totals = daily_totals(&entries, date(2025, 1, 15));
    assert_eq!(totals.minutes.len(), 15);
    assert!(totals.iter().all(|(_, m)| m == 0));
    assert_eq!(totals.total, 0);
}

#[test]
fn total_is_sum_across_categories() {
    let day = date(2025, 3, 2);
    let entries = vec![
        entry(TaskCode::ClinicalRounds, 30, day),
        entry(TaskCode::ClinicalRounds, 45, day),
        entry(TaskCode::Emails, 20, day),
        entry(TaskCode::Other, 5, day),
    ];

    let totals = daily_totals(&entries, day);
    assert_eq!(totals.get(TaskCode::ClinicalRounds), 75);
    assert_eq!(totals.get(TaskCode::Emails), 20);
    assert_eq!(totals.get(TaskCode::Other), 5);
    assert_eq!(totals.total, 100);
    assert_eq!(totals.total, totals.iter().map(|(_, m)| m).sum::<u64>());
}

#[test]
fn totals_by_day_groups_and_orders_dates() {
    let entries = vec![
        entry(TaskCode::Amu, 10, date(2025, 1, 16)),
        entry(TaskCode::Amr, 20, date(2025, 1, 14)),
        entry(TaskCode::Amu, 5, date(2025, 1, 16)),
    ];

    let days = totals_by_day(&entries);
    let dates: Vec<_> = days.keys().copied().collect();
    assert_eq!(dates, vec![date(2025, 1, 14), date(2025, 1, 16)]);
    assert_eq!(days[&date(2025, 1, 16)].get(TaskCode::Amu), 15);
    assert_eq!(days[&date(2025, 1, 14)].total, 20);
}

#[test]
fn totals_serialize_with_task_codes_as_keys() {
    let entries = vec![entry(TaskCode::QiProjectsResearch, 60, date(2025, 1, 15))];
    let totals = daily_totals(&entries, date(2025, 1, 15));

    let json = serde_json::to_value(&totals).unwrap();
    assert_eq!(json["minutes"]["QI_PROJECTS_RESEARCH"], 60);
    assert_eq!(json["minutes"]["PAF"], 0);
    assert_eq!(json["date"], "2025-01-15");
}
