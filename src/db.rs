//! Database access.
//!
//! [`TableSink`] is the seam the schema writer and row loader talk to;
//! [`DbClient`] implements it over a single PostgreSQL session.

use crate::error::{ImportError, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection as _;
use std::str::FromStr as _;

/// Where the schema writer and row loader send their statements.
#[expect(async_fn_in_trait)]
pub trait TableSink {
    /// Runs a statement without parameters.
    async fn execute(&mut self, sql: &str) -> Result<()>;

    /// Runs a parameterized insert, binding `values` positionally as text.
    async fn insert(&mut self, sql: &str, values: &[String]) -> Result<()>;
}

/// A single PostgreSQL session for the whole run.
pub struct DbClient {
    conn: PgConnection,
}

impl DbClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| ImportError::Connect(format!("Invalid database URL: {e}")))?;
        Self::connect_with(&options).await
    }

    pub async fn connect_with(options: &PgConnectOptions) -> Result<Self> {
        let conn = PgConnection::connect_with(options)
            .await
            .map_err(|e| ImportError::Connect(e.to_string()))?;
        tracing::info!("Connected to PostgreSQL");
        Ok(Self { conn })
    }

    /// Closes the session cleanly. Dropping the client also closes it.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

impl TableSink for DbClient {
    async fn execute(&mut self, sql: &str) -> Result<()> {
        sqlx::query(sql).execute(&mut self.conn).await?;
        Ok(())
    }

    async fn insert(&mut self, sql: &str, values: &[String]) -> Result<()> {
        let mut query = sqlx::query(sql);
        for value in values {
            query = query.bind(value.as_str());
        }
        query
            .execute(&mut self.conn)
            .await
            .map_err(|e| ImportError::Insert(e.to_string()))?;
        Ok(())
    }
}
