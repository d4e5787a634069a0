use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sparc_core::models::time_entry::TimeEntry;

use crate::delimited::write_csv;
use crate::display::DisplayFormat;
use crate::error::ExportError;
use crate::range::{ExportRange, filter_range};
use crate::table::{Cell, RawTimeEntry, TableRow, rows_from_entries, rows_from_raw};
use crate::xlsx::{DEFAULT_SHEET_NAME, write_xlsx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(ExportError::Unknown {
                kind: "format",
                value: other.to_string(),
            }),
        }
    }
}

/// Options for the spreadsheet export. CSV ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub sheet_name: String,
    pub display: DisplayFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            display: DisplayFormat::default(),
        }
    }
}

/// A finished export, ready to be written to disk or sent as a download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `sparc_entries_<YYYY-MM-DD>_<range>.<ext>`
pub fn export_filename(today: Date, range: ExportRange, format: ExportFormat) -> String {
    format!("sparc_entries_{today}_{range}.{}", format.extension())
}

/// Filter `entries` to `range` and render them in `format`.
///
/// `today` is the caller's current local date; it selects the range and
/// stamps the filename but never appears in the rows. Any formatter error
/// is reported as [`ExportError::ExportFailed`].
pub fn export(
    entries: &[TimeEntry],
    format: ExportFormat,
    range: ExportRange,
    today: Date,
    options: &ExportOptions,
) -> Result<ExportFile, ExportError> {
    let selected = filter_range(entries, range, today);
    render(&rows_from_entries(&selected), format, range, today, options)
}

/// Like [`export`], for loosely-typed records. Rows whose date could not be
/// parsed are only included in [`ExportRange::All`].
pub fn export_raw(
    entries: &[RawTimeEntry],
    format: ExportFormat,
    range: ExportRange,
    today: Date,
    options: &ExportOptions,
) -> Result<ExportFile, ExportError> {
    let rows: Vec<TableRow> = rows_from_raw(entries)
        .into_iter()
        .filter(|row| match &row.cells[0] {
            Cell::Date(date) => range.contains(*date, today),
            _ => range == ExportRange::All,
        })
        .collect();
    render(&rows, format, range, today, options)
}

fn render(
    rows: &[TableRow],
    format: ExportFormat,
    range: ExportRange,
    today: Date,
    options: &ExportOptions,
) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => write_csv(rows).map(String::into_bytes),
        ExportFormat::Xlsx => write_xlsx(rows, &options.sheet_name, &options.display),
    }
    .map_err(|e| {
        tracing::error!(%format, %range, error = %e, "export failed");
        match e {
            ExportError::ExportFailed(msg) => ExportError::ExportFailed(msg),
            other => ExportError::ExportFailed(other.to_string()),
        }
    })?;

    let filename = export_filename(today, range, format);
    tracing::info!(%filename, rows = rows.len(), bytes = bytes.len(), "export ready");

    Ok(ExportFile {
        filename,
        mime_type: format.mime_type(),
        bytes,
    })
}
