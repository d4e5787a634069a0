use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::display::iso_millis;
use crate::error::ExportError;
use crate::table::{COLUMNS, Cell, TableRow};

/// Generate UTF-8 CSV with a header row.
///
/// Fields are quoted only when they contain a comma, a double quote, or a
/// line break; embedded quotes are doubled. Dates are `YYYY-MM-DD` and
/// timestamps ISO-8601 UTC, so the output does not depend on where it is
/// generated.
pub fn write_csv(rows: &[TableRow]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.cells.iter().map(csv_field))?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    tracing::debug!(rows = rows.len(), bytes = bytes.len(), "wrote csv export");

    String::from_utf8(bytes).map_err(|e| ExportError::ExportFailed(e.to_string()))
}

fn csv_field(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Integer(n) => n.to_string(),
        Cell::Date(d) => d.to_string(),
        Cell::Timestamp(ts) => iso_millis(*ts),
    }
}
