use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures of a proxied request, each rendered as a JSON envelope.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The backend answered with a non-success status; it is mirrored.
    #[error("Backend error: {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    /// The backend was unreachable or sent something that is not JSON.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            Self::MethodNotAllowed => {
                let mut resp = (
                    StatusCode::METHOD_NOT_ALLOWED,
                    Json(json!({ "error": "Method not allowed" })),
                )
                    .into_response();
                resp.headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("GET"));
                resp
            }
            Self::Upstream {
                status,
                ref status_text,
            } => {
                let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (
                    code,
                    Json(json!({ "error": format!("Backend error: {status} {status_text}") })),
                )
                    .into_response()
            }
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error", "message": message })),
            )
                .into_response(),
        }
    }
}

/// Failure to start or run the listener.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
