//! # Bundled Sample Database
//!
//! The `Local` connection mode resolves to a sample SQLite database at a
//! configured path. The seed is compiled into the binary, so a fresh
//! deployment materializes the file on first startup; an existing file is
//! left untouched so local edits survive restarts.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// The SQL seed the sample database is created from.
pub const SAMPLE_SEED_SQL: &str = include_str!("../db/seed.sql");

/// Creates the sample database at `path` if it does not exist yet.
pub async fn ensure_sample_db(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    for statement in SAMPLE_SEED_SQL.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        sqlx::query(statement).execute(&pool).await?;
    }
    pool.close().await;

    info!(path = %path.display(), "Sample database created from the bundled seed");
    Ok(())
}
