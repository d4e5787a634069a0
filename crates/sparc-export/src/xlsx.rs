use rust_xlsxwriter::{Format, Workbook};

use crate::display::DisplayFormat;
use crate::error::ExportError;
use crate::table::{COLUMNS, Cell, TableRow};

pub const DEFAULT_SHEET_NAME: &str = "Time Entries";

/// Column widths in Excel character units, in [`COLUMNS`] order.
const COLUMN_WIDTHS: [f64; 7] = [12.0, 30.0, 20.0, 10.0, 40.0, 22.0, 22.0];

const MAX_SHEET_NAME_LEN: usize = 31;

/// Generate a single-sheet XLSX workbook.
///
/// Unlike CSV, dates and timestamps are written as display strings using
/// `display` (and its time zone), and minutes as numeric cells.
pub fn write_xlsx(
    rows: &[TableRow],
    sheet_name: &str,
    display: &DisplayFormat,
) -> Result<Vec<u8>, ExportError> {
    let zone = display.zone();
    let header = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sanitize_sheet_name(sheet_name))?;

    for (col, (title, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, width)?;
        sheet.write_string_with_format(0, col, *title, &header)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (idx, row) in rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.write_string(row_num, col, s)?;
                }
                Cell::Integer(n) => {
                    sheet.write_number(row_num, col, *n as f64)?;
                }
                Cell::Date(d) => {
                    sheet.write_string(row_num, col, display.date(*d))?;
                }
                Cell::Timestamp(ts) => {
                    sheet.write_string(row_num, col, display.timestamp(*ts, &zone))?;
                }
            }
        }
    }

    let buf = workbook.save_to_buffer()?;
    tracing::debug!(rows = rows.len(), bytes = buf.len(), "wrote xlsx export");
    Ok(buf)
}

/// Excel sheet names are at most 31 characters and may not contain
/// `[ ] : * ? / \`.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        cleaned
    }
}
