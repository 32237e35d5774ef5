use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning a connection descriptor into a live handle.
///
/// None of these are retried automatically; they are surfaced to the caller
/// for display and halt the connection attempt.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Database file not found: {0}")]
    NotFound(PathBuf),
    #[error("Invalid connection configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to connect to the database: {0}")]
    ConnectionFailed(String),
    #[error("The database opened but is not usable: {0}")]
    InvalidDatabase(String),
    #[error("Failed to write uploaded database to disk: {0}")]
    TempFile(#[from] std::io::Error),
}

/// Errors from the AI collaborator boundary and query execution.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to the AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize the AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("No database is connected")]
    NoDatabase,
    #[error("Generated statement is not read-only: {0}")]
    NotReadOnly(String),
    #[error("Query execution failed: {0}")]
    QueryFailed(String),
    #[error("Failed to serialize query result: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}
