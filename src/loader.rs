//! Row loading.
//!
//! Each data row is projected onto the kept columns and inserted on its own.
//! There is no surrounding transaction: a row that fails is reported and
//! skipped, and the rows around it stay committed.

use crate::db::TableSink;
use crate::header::NormalizedColumn;

/// `INSERT` with `$1..$n` placeholders in column order.
pub fn insert_sql(table: &str, columns: &[NormalizedColumn]) -> String {
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {table} ({}) VALUES ({});",
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Picks the kept cells out of `row`, in column order. Cells past the end of
/// the row come back empty.
pub fn project_row(row: &[String], columns: &[NormalizedColumn]) -> Vec<String> {
    columns
        .iter()
        .map(|c| row.get(c.source_index).cloned().unwrap_or_default())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// Position in the sheet, counting the header as row 1.
    pub row_number: usize,
    pub cause: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub failures: Vec<RowFailure>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}

/// Inserts every row after the header.
///
/// A rejected row produces one WARN event at the moment it fails, naming the
/// row, and is recorded in the report.
pub async fn load_rows<S: TableSink>(
    sink: &mut S,
    table: &str,
    rows: &[Vec<String>],
    columns: &[NormalizedColumn],
) -> LoadReport {
    let sql = insert_sql(table, columns);
    let mut report = LoadReport::default();

    for (index, row) in rows.iter().enumerate().skip(1) {
        let values = project_row(row, columns);
        match sink.insert(&sql, &values).await {
            Ok(()) => report.inserted += 1,
            Err(e) => {
                let row_number = index + 1;
                tracing::warn!(row = row_number, "Row {row_number} skipped: {e}");
                report.failures.push(RowFailure {
                    row_number,
                    cause: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped(),
        "Finished loading rows"
    );
    report
}
