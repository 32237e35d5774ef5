//! SQLite backend for the database handle, via sqlx.

use crate::errors::{AgentError, ConnectError};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row};
use std::path::Path;
use tracing::debug;

/// Opens a pool over an existing SQLite file.
///
/// The default sqlx mode does not create missing files, so a bad path fails
/// here rather than silently producing an empty database.
pub async fn open_pool(path: &Path) -> Result<SqlitePool, ConnectError> {
    let url = format!("sqlite://{}", path.display());
    debug!(url = %url, "Opening SQLite pool");
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .map_err(|e| ConnectError::ConnectionFailed(e.to_string()))
}

/// Lists user table names from `sqlite_master`, excluding SQLite internals.
pub async fn list_tables(pool: &SqlitePool) -> Result<Vec<String>, ConnectError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| ConnectError::InvalidDatabase(e.to_string()))?;
    Ok(rows)
}

/// Returns `(column, declared_type)` pairs for a table via `PRAGMA table_info`.
pub async fn describe_table(
    pool: &SqlitePool,
    table: &str,
) -> Result<Vec<(String, String)>, AgentError> {
    let rows = sqlx::query(&format!("PRAGMA table_info(\"{}\")", table.replace('"', "\"\"")))
        .fetch_all(pool)
        .await
        .map_err(|e| AgentError::QueryFailed(e.to_string()))?;
    Ok(rows
        .iter()
        .map(|row| {
            let name: String = row.get("name");
            let type_name: String = row.get("type");
            (name, type_name)
        })
        .collect())
}

/// Runs a query and converts each row to a JSON object.
pub async fn execute_query(pool: &SqlitePool, sql: &str) -> Result<Vec<Value>, AgentError> {
    let rows = sqlx::query(sql)
        .fetch_all(pool)
        .await
        .map_err(|e| AgentError::QueryFailed(e.to_string()))?;
    Ok(rows.iter().map(row_to_json).collect())
}

/// Best-effort conversion of a dynamically typed row into JSON.
///
/// SQLite columns are loosely typed (expression columns carry no declared
/// type at all), so decoding is attempted per value rather than driven by the
/// declared column type.
fn row_to_json(row: &SqliteRow) -> Value {
    let mut object = Map::new();
    for column in row.columns() {
        let index = column.ordinal();
        let value = if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
            v.map(Value::from).unwrap_or(Value::Null)
        } else if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
            v.map(Value::from).unwrap_or(Value::Null)
        } else if let Ok(v) = row.try_get::<Option<String>, _>(index) {
            v.map(Value::from).unwrap_or(Value::Null)
        } else if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(index) {
            v.map(|bytes| Value::from(format!("<{} byte blob>", bytes.len())))
                .unwrap_or(Value::Null)
        } else {
            Value::Null
        };
        object.insert(column.name().to_string(), value);
    }
    Value::Object(object)
}
