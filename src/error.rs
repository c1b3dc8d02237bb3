//! Error types for an import run.
//!
//! Errors fall into two tiers:
//!
//! - **Fatal**: everything in [`ImportError`] except [`ImportError::Insert`].
//!   These propagate with `?` up to `main` and end the run.
//! - **Per row**: [`ImportError::Insert`], raised by a single `INSERT`. The
//!   row loader catches these, records a [`crate::loader::RowFailure`] and
//!   moves on to the next row.
//!
//! ```
//! use sheetload::error::ImportError;
//!
//! fn is_fatal(err: &ImportError) -> bool {
//!     !matches!(err, ImportError::Insert(_))
//! }
//!
//! assert!(is_fatal(&ImportError::SheetEmpty("PLANNING".to_owned())));
//! ```

use std::fmt;

/// Main error type for sheetload operations.
#[derive(Debug)]
pub enum ImportError {
    /// I/O errors outside the workbook reader
    Io(std::io::Error),

    /// Could not open a database session
    Connect(String),

    /// Workbook missing or unreadable
    Workbook(String),

    /// The requested sheet does not exist in the workbook
    SheetNotFound(String),

    /// The requested sheet has no rows
    SheetEmpty(String),

    /// The database rejected the `CREATE TABLE` statement
    CreateTable { sql: String, cause: String },

    /// A statement other than `CREATE TABLE` failed
    Statement(String),

    /// A single row insert failed
    Insert(String),

    /// Bad configuration file or value
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Connect(msg) => write!(f, "Connection error: {msg}"),
            Self::Workbook(msg) => write!(f, "Workbook error: {msg}"),
            Self::SheetNotFound(name) => write!(f, "Sheet '{name}' not found"),
            Self::SheetEmpty(name) => write!(f, "Sheet '{name}' is empty"),
            Self::CreateTable { sql, cause } => {
                write!(f, "Failed to create table: {cause}\nSQL: {sql}")
            }
            Self::Statement(msg) => write!(f, "Statement error: {msg}"),
            Self::Insert(msg) => write!(f, "Insert error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err.to_string())
    }
}

impl From<sqlx::Error> for ImportError {
    fn from(err: sqlx::Error) -> Self {
        Self::Statement(err.to_string())
    }
}

/// Result type alias for sheetload operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ImportError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: ImportError = e.into();
            ImportError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: ImportError = e.into();
            ImportError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImportError::SheetNotFound("PLANNING".to_owned());
        assert_eq!(err.to_string(), "Sheet 'PLANNING' not found");
    }

    #[test]
    fn test_create_table_display_includes_sql() {
        let err = ImportError::CreateTable {
            sql: "CREATE TABLE t (id SERIAL PRIMARY KEY, );".to_owned(),
            cause: "syntax error at or near \")\"".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("syntax error"));
        assert!(msg.contains("SQL: CREATE TABLE t"));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "settings.json",
        ));

        let result: Result<()> = result.context("Failed to read settings");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read settings")
        );
    }
}
