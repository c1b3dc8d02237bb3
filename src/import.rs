//! One import run: header row in, table recreated, data rows loaded.

use crate::db::TableSink;
use crate::error::{ImportError, Result};
use crate::header::{NormalizedColumn, normalize_headers};
use crate::loader::{LoadReport, load_rows};
use crate::schema::recreate_table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub columns: Vec<NormalizedColumn>,
    pub report: LoadReport,
}

/// Normalizes the header (`rows[0]`) and derives the column set without
/// touching the database.
pub fn plan_columns(rows: &[Vec<String>]) -> Result<Vec<NormalizedColumn>> {
    let header = rows
        .first()
        .ok_or_else(|| ImportError::Other("No header row to import".to_owned()))?;
    Ok(normalize_headers(header))
}

/// Runs the whole import of `rows` into `table` through `sink`.
///
/// Only table creation can fail; per-row insert failures end up in the
/// returned report.
pub async fn import_rows<S: TableSink>(
    sink: &mut S,
    table: &str,
    rows: &[Vec<String>],
) -> Result<ImportOutcome> {
    let columns = plan_columns(rows)?;
    if columns.is_empty() {
        tracing::warn!("Every header column was excluded; table creation will fail");
    }

    recreate_table(sink, table, &columns).await?;
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    tracing::info!("Table {table} created. Columns: {}", names.join(", "));

    let report = load_rows(sink, table, rows, &columns).await;
    Ok(ImportOutcome { columns, report })
}
