use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dbchat::{AgentError, ConnectError};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the
/// server, allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Connection lifecycle errors from the `dbchat` library.
    Connect(ConnectError),
    /// AI collaborator and query errors from the `dbchat` library.
    Agent(AgentError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<ConnectError> for AppError {
    fn from(err: ConnectError) -> Self {
        AppError::Connect(err)
    }
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        AppError::Agent(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Connect(err) => {
                error!("ConnectError: {:?}", err);
                let status = match err {
                    ConnectError::NotFound(_) => StatusCode::NOT_FOUND,
                    ConnectError::InvalidConfig(_) | ConnectError::InvalidDatabase(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    ConnectError::ConnectionFailed(_) => StatusCode::BAD_GATEWAY,
                    ConnectError::TempFile(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            AppError::Agent(err) => {
                error!("AgentError: {:?}", err);
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
