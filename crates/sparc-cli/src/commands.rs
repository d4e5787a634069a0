use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use eyre::WrapErr;
use jiff::civil::Date;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use sparc_audit::events::AuditEvent;
use sparc_audit::telemetry::Telemetry;
use sparc_core::aggregate::{self, DailyTotals};
use sparc_core::models::time_entry::{NewTimeEntry, TimeEntry};
use sparc_export::file::{self, ExportFile, ExportFormat};
use sparc_export::range::ExportRange;
use sparc_export::table::RawTimeEntry;
use sparc_instruments::Instrument;
use sparc_instruments::instruments::olbi::{BurnoutSurveyResponse, Olbi};
use sparc_storage::memory::MemoryStore;
use sparc_storage::tracker::TimeTracker;

use crate::cli::{Command, ConfigAction};
use crate::config::{self, SparcConfig};

/// Run one subcommand and return what should be printed to stdout.
pub async fn run(command: Command, config: &SparcConfig, config_path: &Path) -> eyre::Result<String> {
    match command {
        Command::Score { responses, summary } => score(&responses, summary, config).await,
        Command::Totals {
            entries,
            date,
            history,
        } => totals(&entries, date, history, config).await,
        Command::Export {
            entries,
            format,
            range,
            out,
            raw,
            today,
        } => {
            let today = today.unwrap_or_else(local_today);
            let exported = if raw {
                export_raw(&entries, format.into(), range.into(), today, config)?
            } else {
                export(&entries, format.into(), range.into(), today, config)?
            };
            let dir = out
                .or_else(|| config.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let path = write_export(&dir, &exported)?;
            Ok(format!("wrote {} ({} bytes)", path.display(), exported.bytes.len()))
        }
        Command::Log {
            entries,
            task,
            other,
            minutes,
            date,
            comment,
        } => {
            let new = NewTimeEntry {
                task,
                other_task: other,
                minutes,
                occurred_on: date.unwrap_or_else(local_today),
                comment,
            };
            let tracker = open_tracker(&entries, config)?;
            let entry = tracker.quick_log(new).await?;
            save_entries(&entries, &tracker.entries().await?)?;
            Ok(entry.id.to_string())
        }
        Command::Duplicate { entries, ids, onto } => {
            let tracker = open_tracker(&entries, config)?;
            let copies = tracker.duplicate(&ids, onto).await?;
            save_entries(&entries, &tracker.entries().await?)?;
            Ok(copies
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Delete { entries, ids } => {
            let tracker = open_tracker(&entries, config)?;
            let removed = tracker.bulk_delete(&ids).await?;
            save_entries(&entries, &tracker.entries().await?)?;
            Ok(format!("deleted {removed} of {} entries", ids.len()))
        }
        Command::Config { action } => config_command(action, config, config_path),
    }
}

/// Validate and score a survey answer set. Returns pretty JSON, or the
/// instrument's text report when `summary` is set.
pub async fn score(path: &Path, summary: bool, config: &SparcConfig) -> eyre::Result<String> {
    let responses: Vec<BurnoutSurveyResponse> = read_json(path)?;
    let tracker = tracker_with(Vec::new(), config);
    let scores = tracker.submit_survey(responses).await?;
    if summary {
        return Ok(Olbi.summarize(&scores.to_score_entries()).trim_end().to_string());
    }
    Ok(serde_json::to_string_pretty(&scores)?)
}

pub async fn totals(
    path: &Path,
    date: Option<Date>,
    history: bool,
    config: &SparcConfig,
) -> eyre::Result<String> {
    let entries = load_entries(path)?;
    if history {
        let days = aggregate::totals_by_day(&entries);
        let mut out = String::new();
        for day in days.values() {
            out.push_str(&render_totals(day));
        }
        return Ok(out.trim_end().to_string());
    }

    let tracker = tracker_with(entries, config);
    let totals = tracker.daily_totals(date.unwrap_or_else(local_today)).await?;
    Ok(render_totals(&totals).trim_end().to_string())
}

/// Export the entries file in its own row order.
pub fn export(
    path: &Path,
    format: ExportFormat,
    range: ExportRange,
    today: Date,
    config: &SparcConfig,
) -> eyre::Result<ExportFile> {
    let entries = load_entries(path)?;
    let exported = file::export(&entries, format, range, today, &config.export_options())?;
    record_export(config, &exported, format, range);
    Ok(exported)
}

pub fn export_raw(
    path: &Path,
    format: ExportFormat,
    range: ExportRange,
    today: Date,
    config: &SparcConfig,
) -> eyre::Result<ExportFile> {
    let records: Vec<RawTimeEntry> = read_json(path)?;
    let exported = file::export_raw(&records, format, range, today, &config.export_options())?;
    record_export(config, &exported, format, range);
    Ok(exported)
}

fn record_export(
    config: &SparcConfig,
    exported: &ExportFile,
    format: ExportFormat,
    range: ExportRange,
) {
    Telemetry::new(config.user_id.clone()).record(
        AuditEvent::new("export", "time_entries", exported.filename.clone())
            .with_details(json!({ "format": format, "range": range })),
    );
}

/// Write `exported` into `dir` under its generated filename.
pub fn write_export(dir: &Path, exported: &ExportFile) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(&exported.filename);
    std::fs::write(&path, &exported.bytes)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), mime_type = exported.mime_type, "export written");
    Ok(path)
}

fn config_command(
    action: ConfigAction,
    config: &SparcConfig,
    config_path: &Path,
) -> eyre::Result<String> {
    match action {
        ConfigAction::Show => Ok(format!(
            "# {}\n{}",
            config_path.display(),
            serde_json::to_string_pretty(config)?
        )),
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                return Err(eyre::eyre!(
                    "config already exists at {} (use --force to overwrite)",
                    config_path.display()
                ));
            }
            config::save_config_to(config_path, &SparcConfig::default())?;
            Ok(format!("wrote {}", config_path.display()))
        }
        ConfigAction::Reset => {
            config::delete_config_at(config_path)?;
            Ok(format!("removed {}", config_path.display()))
        }
    }
}

fn render_totals(totals: &DailyTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", totals.date);
    for (task, minutes) in totals.iter() {
        let _ = writeln!(out, "  {:<30} {:<42} {:>5}", task.code(), task.label(), minutes);
    }
    let _ = writeln!(out, "  {:<30} {:<42} {:>5}", "TOTAL", "", totals.total);
    out
}

fn open_tracker(path: &Path, config: &SparcConfig) -> eyre::Result<TimeTracker> {
    Ok(tracker_with(load_entries(path)?, config))
}

fn tracker_with(entries: Vec<TimeEntry>, config: &SparcConfig) -> TimeTracker {
    let store = Arc::new(MemoryStore::with_entries(&config.user_id, entries));
    TimeTracker::new(
        config.user_id.clone(),
        store.clone(),
        store,
        Telemetry::new(config.user_id.clone()),
    )
}

/// Entries stored at `path`. A missing file is an empty list.
pub fn load_entries(path: &Path) -> eyre::Result<Vec<TimeEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json(path)
}

/// Replace the entries file atomically.
pub fn save_entries(path: &Path, entries: &[TimeEntry]) -> eyre::Result<()> {
    write_json(path, entries)?;
    tracing::info!(path = %path.display(), count = entries.len(), "entries saved");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).wrap_err_with(|| format!("failed to parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> eyre::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, serde_json::to_string_pretty(value)?)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn local_today() -> Date {
    jiff::Zoned::now().date()
}
