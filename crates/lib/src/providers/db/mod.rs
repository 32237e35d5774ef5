//! # Database Connector & Handle
//!
//! Turns a `ConnectionDescriptor` into a live, queryable `DatabaseHandle`, or
//! fails with a typed `ConnectError`. Every successful connection performs a
//! liveness check (table listing) before the handle is handed out; the table
//! names are cached on the handle for display and schema-context building.
//! No other metadata is read eagerly.

pub mod mysql;
pub mod sqlite;

use crate::descriptor::ConnectionDescriptor;
use crate::errors::{AgentError, ConnectError};
use crate::temp::TempSlot;
use serde_json::Value;
use sqlx::{MySqlPool, SqlitePool};
use tracing::info;

/// The backend-specific connection pool behind a handle.
#[derive(Debug, Clone)]
enum Pool {
    Sqlite(SqlitePool),
    MySql(MySqlPool),
}

/// A live connection plus cached table names.
///
/// Owned exclusively by the current session and replaced wholesale on
/// reconnect; turns run serially so no locking is needed on the handle
/// itself.
#[derive(Debug, Clone)]
pub struct DatabaseHandle {
    pool: Pool,
    source_label: String,
    tables: Vec<String>,
}

impl DatabaseHandle {
    /// Table names cached at connect time.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// A human-readable label for the connected source.
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// The SQL dialect name, used to steer query generation.
    pub fn dialect(&self) -> &'static str {
        match self.pool {
            Pool::Sqlite(_) => "SQLite",
            Pool::MySql(_) => "MySQL",
        }
    }

    /// Returns `(column, type)` pairs for one table.
    pub async fn describe_table(&self, table: &str) -> Result<Vec<(String, String)>, AgentError> {
        match &self.pool {
            Pool::Sqlite(pool) => sqlite::describe_table(pool, table).await,
            Pool::MySql(pool) => mysql::describe_table(pool, table).await,
        }
    }

    /// Executes a query and returns the rows as a JSON array of objects.
    pub async fn execute_query(&self, sql: &str) -> Result<Vec<Value>, AgentError> {
        match &self.pool {
            Pool::Sqlite(pool) => sqlite::execute_query(pool, sql).await,
            Pool::MySql(pool) => mysql::execute_query(pool, sql).await,
        }
    }
}

/// Opens a handle for the given descriptor.
///
/// For uploads, the payload is written into `temp` before opening; if the
/// file then fails the table-listing check, the just-created temp file is
/// deleted before the error propagates, so no orphan remains on disk.
pub async fn connect(
    descriptor: &ConnectionDescriptor,
    temp: &mut TempSlot,
) -> Result<DatabaseHandle, ConnectError> {
    descriptor.validate()?;
    let source_label = descriptor.source_label();

    let pool = match descriptor {
        ConnectionDescriptor::Local { path } => {
            if !path.exists() {
                return Err(ConnectError::NotFound(path.clone()));
            }
            Pool::Sqlite(sqlite::open_pool(path).await?)
        }
        ConnectionDescriptor::Uploaded { bytes, .. } => {
            let path = temp.materialize(bytes)?;
            match sqlite::open_pool(&path).await {
                Ok(pool) => Pool::Sqlite(pool),
                Err(e) => {
                    temp.cleanup();
                    return Err(e);
                }
            }
        }
        ConnectionDescriptor::Remote {
            host,
            user,
            password,
            database,
        } => Pool::MySql(mysql::open_pool(host, user, password, database).await?),
    };

    let tables = match list_tables(&pool).await {
        Ok(tables) if !tables.is_empty() => tables,
        Ok(_) => {
            fail_liveness(descriptor, &pool, temp).await;
            return Err(ConnectError::InvalidDatabase(
                "The database contains no tables".to_string(),
            ));
        }
        Err(e) => {
            fail_liveness(descriptor, &pool, temp).await;
            return Err(e);
        }
    };

    info!(source = %source_label, tables = tables.len(), "Database connected");
    Ok(DatabaseHandle {
        pool,
        source_label,
        tables,
    })
}

async fn list_tables(pool: &Pool) -> Result<Vec<String>, ConnectError> {
    match pool {
        Pool::Sqlite(pool) => sqlite::list_tables(pool).await,
        Pool::MySql(pool) => mysql::list_tables(pool).await,
    }
}

/// Releases resources for a connection that failed its liveness check.
async fn fail_liveness(descriptor: &ConnectionDescriptor, pool: &Pool, temp: &mut TempSlot) {
    match pool {
        Pool::Sqlite(pool) => pool.close().await,
        Pool::MySql(pool) => pool.close().await,
    }
    if matches!(descriptor, ConnectionDescriptor::Uploaded { .. }) {
        temp.cleanup();
    }
}
