//! Integration tests for the connection lifecycle: descriptor dispatch,
//! liveness checks, and temp-file bookkeeping for uploads.

use dbchat::{connect, ConnectError, ConnectionDescriptor, TempSlot};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Creates a small SQLite database with a populated `students` table.
async fn create_sample_db(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("create scratch db");
    sqlx::query("CREATE TABLE students (id INTEGER PRIMARY KEY, name TEXT, score REAL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO students (name, score) VALUES ('Ada', 91.5), ('Grace', 88.0), ('Alan', 76.25)")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
}

/// Creates a structurally valid SQLite file that contains no tables.
async fn create_empty_db(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .unwrap();
    sqlx::query("CREATE TABLE placeholder (id INTEGER)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DROP TABLE placeholder")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
}

#[tokio::test]
async fn local_connect_caches_table_names() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("sample.db");
    create_sample_db(&db_path).await;

    let descriptor = ConnectionDescriptor::Local {
        path: db_path.clone(),
    };
    let mut temp = TempSlot::new();
    let handle = connect(&descriptor, &mut temp).await.unwrap();

    assert_eq!(handle.tables(), ["students"]);
    assert_eq!(handle.dialect(), "SQLite");
    assert_eq!(handle.source_label(), "sample.db");
    // Local connections never touch the temp slot.
    assert!(temp.path().is_none());
}

#[tokio::test]
async fn local_missing_file_is_not_found() {
    let descriptor = ConnectionDescriptor::Local {
        path: PathBuf::from("/nonexistent/sample.db"),
    };
    let mut temp = TempSlot::new();
    let err = connect(&descriptor, &mut temp).await.unwrap_err();
    assert!(matches!(err, ConnectError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn local_db_without_tables_is_invalid_database() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("empty.db");
    create_empty_db(&db_path).await;

    let descriptor = ConnectionDescriptor::Local { path: db_path };
    let mut temp = TempSlot::new();
    let err = connect(&descriptor, &mut temp).await.unwrap_err();
    assert!(matches!(err, ConnectError::InvalidDatabase(_)), "got {err:?}");
}

#[tokio::test]
async fn uploaded_db_connects_and_tracks_one_temp_file() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("upload.db");
    create_sample_db(&db_path).await;
    let bytes = std::fs::read(&db_path).unwrap();

    let descriptor = ConnectionDescriptor::Uploaded {
        file_name: "upload.db".to_string(),
        bytes,
    };
    let mut temp = TempSlot::new();
    let handle = connect(&descriptor, &mut temp).await.unwrap();

    assert_eq!(handle.tables(), ["students"]);
    let temp_path = temp.path().expect("temp file should be tracked").to_path_buf();
    assert!(temp_path.exists());
}

#[tokio::test]
async fn reupload_replaces_the_temp_file() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("upload.db");
    create_sample_db(&db_path).await;
    let bytes = std::fs::read(&db_path).unwrap();

    let mut temp = TempSlot::new();
    let first_descriptor = ConnectionDescriptor::Uploaded {
        file_name: "first.db".to_string(),
        bytes: bytes.clone(),
    };
    connect(&first_descriptor, &mut temp).await.unwrap();
    let first_path = temp.path().unwrap().to_path_buf();

    let second_descriptor = ConnectionDescriptor::Uploaded {
        file_name: "second.db".to_string(),
        bytes,
    };
    connect(&second_descriptor, &mut temp).await.unwrap();
    let second_path = temp.path().unwrap().to_path_buf();

    // Exactly one temp file on disk at any time.
    assert!(!first_path.exists());
    assert!(second_path.exists());
    assert_ne!(first_path, second_path);
}

#[tokio::test]
async fn garbage_upload_fails_and_leaves_no_temp_file() {
    let descriptor = ConnectionDescriptor::Uploaded {
        file_name: "garbage.db".to_string(),
        bytes: b"this is definitely not a sqlite database".to_vec(),
    };
    let mut temp = TempSlot::new();
    let err = connect(&descriptor, &mut temp).await.unwrap_err();
    assert!(
        matches!(
            err,
            ConnectError::InvalidDatabase(_) | ConnectError::ConnectionFailed(_)
        ),
        "got {err:?}"
    );
    assert!(temp.path().is_none(), "no temp file may remain after failure");
}

#[tokio::test]
async fn empty_upload_is_rejected_before_any_open() {
    let descriptor = ConnectionDescriptor::Uploaded {
        file_name: "empty.db".to_string(),
        bytes: vec![],
    };
    let mut temp = TempSlot::new();
    let err = connect(&descriptor, &mut temp).await.unwrap_err();
    assert!(matches!(err, ConnectError::InvalidConfig(_)), "got {err:?}");
    assert!(temp.path().is_none());
}

#[tokio::test]
async fn incomplete_remote_descriptor_is_rejected_before_any_open() {
    let descriptor = ConnectionDescriptor::Remote {
        host: "localhost".to_string(),
        user: "root".to_string(),
        password: String::new(),
        database: "shop".to_string(),
    };
    let mut temp = TempSlot::new();
    let err = connect(&descriptor, &mut temp).await.unwrap_err();
    assert!(matches!(err, ConnectError::InvalidConfig(_)), "got {err:?}");
}

#[tokio::test]
async fn handle_executes_queries_as_json_rows() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("sample.db");
    create_sample_db(&db_path).await;

    let descriptor = ConnectionDescriptor::Local { path: db_path };
    let mut temp = TempSlot::new();
    let handle = connect(&descriptor, &mut temp).await.unwrap();

    let rows = handle
        .execute_query("SELECT COUNT(*) AS total FROM students")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total"], serde_json::json!(3));

    let columns = handle.describe_table("students").await.unwrap();
    let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["id", "name", "score"]);
}
