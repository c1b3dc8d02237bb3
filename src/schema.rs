//! Destination table (re)creation.

use crate::db::TableSink;
use crate::error::{ImportError, Result};
use crate::header::NormalizedColumn;

pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}

/// `CREATE TABLE` with a serial `id` key followed by one `TEXT` column per
/// normalized header, in order.
///
/// With no columns the statement ends in a dangling `", "` and the database
/// rejects it.
pub fn create_table_sql(table: &str, columns: &[NormalizedColumn]) -> String {
    let column_defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{} TEXT", c.name))
        .collect();
    format!(
        "CREATE TABLE {table} (id SERIAL PRIMARY KEY, {});",
        column_defs.join(", ")
    )
}

/// Drops `table` if present, then creates it from `columns`.
///
/// A failed drop is only logged; the create that follows reports the real
/// problem. A failed create is fatal.
pub async fn recreate_table<S: TableSink>(
    sink: &mut S,
    table: &str,
    columns: &[NormalizedColumn],
) -> Result<()> {
    if let Err(e) = sink.execute(&drop_table_sql(table)).await {
        tracing::warn!(table, error = %e, "DROP TABLE failed");
    }

    let sql = create_table_sql(table, columns);
    sink.execute(&sql)
        .await
        .map_err(|e| ImportError::CreateTable {
            sql: sql.clone(),
            cause: e.to_string(),
        })?;

    tracing::debug!(table, columns = columns.len(), "Created destination table");
    Ok(())
}
