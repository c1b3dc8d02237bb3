//! Worksheet reading.
//!
//! Every cell comes back as text, whatever its type in the workbook. Rows are
//! aligned to cell A1 so that a column's position in a row is its absolute
//! spreadsheet column, even when the used range starts further in.

use crate::error::{ImportError, Result};
use calamine::{Data, ExcelDateTime, Range, Reader as _, open_workbook_auto};
use chrono::Timelike as _;
use std::path::Path;

/// A sheet row as text cells. Trailing empty cells are not kept, and neither
/// are trailing empty rows.
pub type SheetRow = Vec<String>;

/// Reads `sheet` from the workbook at `path`.
///
/// The first returned row is the header. Fails if the file cannot be opened,
/// the sheet does not exist, or the sheet has no rows.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Vec<SheetRow>> {
    if !path.exists() {
        return Err(ImportError::Workbook(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ImportError::Workbook(format!("{}: {e}", path.display())))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(ImportError::SheetNotFound(sheet.to_owned()));
    }

    let range = workbook.worksheet_range(sheet)?;
    let rows = rows_from_range(&range);
    if rows.is_empty() {
        return Err(ImportError::SheetEmpty(sheet.to_owned()));
    }

    tracing::info!(
        file = %path.display(),
        sheet,
        rows = rows.len(),
        "Read worksheet"
    );
    Ok(rows)
}

/// Converts a cell range into text rows anchored at A1.
pub fn rows_from_range(range: &Range<Data>) -> Vec<SheetRow> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<SheetRow> = (0..start_row).map(|_| Vec::new()).collect();
    for cells in range.rows() {
        let mut row: SheetRow = vec![String::new(); start_col as usize];
        row.extend(cells.iter().map(cell_text));
        while row.last().is_some_and(String::is_empty) {
            row.pop();
        }
        rows.push(row);
    }
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
    rows
}

/// Renders one cell as text.
///
/// Dates become ISO text (`2023-07-16`, or `2023-07-16 18:00:00` when there
/// is a time part). Durations and anything else keep calamine's rendering.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => date_text(dt).unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

fn date_text(dt: &ExcelDateTime) -> Option<String> {
    if dt.is_duration() {
        return None;
    }
    let value = dt.as_datetime()?;
    let text = if value.num_seconds_from_midnight() == 0 && value.nanosecond() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    };
    Some(text)
}
