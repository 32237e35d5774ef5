//! # Common Test Utilities
//!
//! `TestApp` spawns the real server on a random port, configured with a
//! scratch sample database and an AI provider pointed at an
//! `httpmock::MockServer`.

#![allow(unused)]

use anyhow::Result;
use dbchat_server::{
    config::{AppConfig, ProviderConfig},
    router,
    state::build_app_state,
};
use httpmock::MockServer;
use reqwest::Client;
use serde_json::json;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub sample_db_path: PathBuf,
    _data_dir: TempDir,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the server with a populated sample database.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_inner(true).await
    }

    /// Spawns the server with a sample database path that does not exist.
    pub async fn spawn_without_sample_db() -> Result<Self> {
        Self::spawn_inner(false).await
    }

    async fn spawn_inner(create_sample: bool) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let data_dir = tempfile::tempdir()?;
        let sample_db_path = data_dir.path().join("sample.db");
        if create_sample {
            create_sample_db(&sample_db_path).await?;
        }

        let config = AppConfig {
            port: 0,
            sample_db_path: sample_db_path.to_string_lossy().into_owned(),
            ai: ProviderConfig {
                provider: "local".to_string(),
                api_url: Some(mock_server.url("/v1/chat/completions")),
                api_key: None,
                model_name: "mock-chat-model".to_string(),
            },
        };

        let app_state = build_app_state(config)?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            sample_db_path,
            _data_dir: data_dir,
            _server_handle: server_handle,
        })
    }

    /// Registers the two mocks a data-question turn needs: one for query
    /// generation, one for answer synthesis.
    pub fn mock_data_turn(&self, sql: &str, answer: &str) {
        let sql = sql.to_string();
        let answer = answer.to_string();
        self.mock_server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/v1/chat/completions")
                .body_contains("# Schema");
            then.status(200).json_body(completion_body(&sql));
        });
        self.mock_server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/v1/chat/completions")
                .body_contains("Query results (JSON)");
            then.status(200).json_body(completion_body(&answer));
        });
    }
}

/// An OpenAI-compatible chat completion response wrapping `content`.
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

/// Creates the sample database the `Local` descriptor resolves to.
pub async fn create_sample_db(path: &Path) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::query("CREATE TABLE students (id INTEGER PRIMARY KEY, name TEXT, score REAL)")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO students (name, score) VALUES ('Ada', 91.5), ('Grace', 88.0)")
        .execute(&pool)
        .await?;
    pool.close().await;
    Ok(())
}
