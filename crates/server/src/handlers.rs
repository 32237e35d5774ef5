//! Request handlers for the dbchat API.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, response::Html, Json};
use axum_extra::extract::Multipart;
use dbchat::{ChatMessage, ConnectionDescriptor};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

// --- API Payloads ---

/// The request body for the `/api/connect` endpoint.
///
/// The local variant carries no path: it always resolves to the bundled
/// sample database configured on the server.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectRequest {
    Local,
    Remote {
        host: String,
        user: String,
        password: String,
        database: String,
    },
}

/// The response body for successful connections.
#[derive(Serialize)]
pub struct ConnectResponse {
    pub message: String,
    pub source: String,
    pub tables: Vec<String>,
}

/// The response body for the `/api/session` endpoint.
#[derive(Serialize)]
pub struct SessionResponse {
    pub connected: bool,
    pub source: Option<String>,
    pub tables: Vec<String>,
    pub transcript: Vec<ChatMessage>,
}

/// The request body for the `/api/chat` endpoint.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// The response body for the `/api/chat` endpoint.
#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

// --- Handlers ---

/// Serves the single-page chat UI.
pub async fn root() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Connects the session to the bundled sample database or a remote MySQL
/// server. Connection errors halt the request; the previous connection, if
/// any, stays in place.
pub async fn connect_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ConnectRequest>,
) -> Result<Json<ConnectResponse>, AppError> {
    let descriptor = match payload {
        ConnectRequest::Local => ConnectionDescriptor::Local {
            path: PathBuf::from(&app_state.config.sample_db_path),
        },
        ConnectRequest::Remote {
            host,
            user,
            password,
            database,
        } => ConnectionDescriptor::Remote {
            host,
            user,
            password,
            database,
        },
    };

    let mut session = app_state.session.lock().await;
    let handle = session.connect(&descriptor).await?;

    info!(source = %handle.source_label(), "Session connected");
    Ok(Json(ConnectResponse {
        message: "Connected".to_string(),
        source: handle.source_label().to_string(),
        tables: handle.tables().to_vec(),
    }))
}

/// Connects the session to an uploaded SQLite file sent as multipart form
/// data under the `file` field.
pub async fn upload_handler(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ConnectResponse>, AppError> {
    let mut file_name: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(anyhow::Error::from)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = Some(field.file_name().unwrap_or("uploaded.db").to_string());
                bytes = Some(field.bytes().await.map_err(anyhow::Error::from)?.to_vec());
            }
            _ => warn!("Ignoring unknown multipart field: {}", name),
        }
    }

    let descriptor = ConnectionDescriptor::Uploaded {
        file_name: file_name.unwrap_or_default(),
        bytes: bytes.unwrap_or_default(),
    };

    let mut session = app_state.session.lock().await;
    let handle = session.connect(&descriptor).await?;

    info!(source = %handle.source_label(), "Uploaded database connected");
    Ok(Json(ConnectResponse {
        message: "Connected".to_string(),
        source: handle.source_label().to_string(),
        tables: handle.tables().to_vec(),
    }))
}

/// Reports the session status and the full transcript for rendering.
pub async fn session_handler(State(app_state): State<AppState>) -> Json<SessionResponse> {
    let session = app_state.session.lock().await;
    let (source, tables) = match session.handle() {
        Some(handle) => (
            Some(handle.source_label().to_string()),
            handle.tables().to_vec(),
        ),
        None => (None, Vec::new()),
    };
    Json(SessionResponse {
        connected: session.handle().is_some(),
        source,
        tables,
        transcript: session.transcript().messages().to_vec(),
    })
}

/// Runs one chat turn. Collaborator failures are reported inside the reply
/// text (and the transcript), never as an HTTP error — each user turn yields
/// exactly one assistant entry.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    info!("Received chat message: '{}'", payload.message);
    let mut session = app_state.session.lock().await;
    let reply = session.take_turn(&payload.message, &app_state.agent).await;
    Json(ChatResponse { reply })
}

/// Clears the transcript back to the seeded greeting.
pub async fn reset_handler(State(app_state): State<AppState>) -> Json<SessionResponse> {
    let mut session = app_state.session.lock().await;
    session.reset_chat();
    let (source, tables) = match session.handle() {
        Some(handle) => (
            Some(handle.source_label().to_string()),
            handle.tables().to_vec(),
        ),
        None => (None, Vec::new()),
    };
    Json(SessionResponse {
        connected: session.handle().is_some(),
        source,
        tables,
        transcript: session.transcript().messages().to_vec(),
    })
}
