use crate::auth::AuthError;
use crate::remote::RemoteError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by HTTP handlers
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Credential(#[from] AuthError),

    /// The identity provider could not vouch for the user
    #[error("Authentication failed: {0}")]
    Identity(RemoteError),

    /// A document store call failed after compilation completed
    #[error("{context}: {source}")]
    Remote {
        context: &'static str,
        source: RemoteError,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ServerError {
    pub fn remote(context: &'static str) -> impl FnOnce(RemoteError) -> Self {
        move |source| ServerError::Remote { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::Credential(AuthError::Missing) => StatusCode::UNAUTHORIZED,
            ServerError::Credential(AuthError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Credential(_) => StatusCode::FORBIDDEN,
            ServerError::Identity(_) => StatusCode::UNAUTHORIZED,
            ServerError::Remote { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            ServerError::BadRequest(message) | ServerError::Unauthorized(message) => {
                (message.clone(), None)
            }
            ServerError::Credential(AuthError::Missing) => (AuthError::Missing.to_string(), None),
            ServerError::Credential(AuthError::Signing(e)) => {
                ("Failed to issue token".to_string(), Some(e.clone()))
            }
            ServerError::Credential(_) => ("Invalid or expired token".to_string(), None),
            ServerError::Identity(e) => ("Authentication failed".to_string(), Some(e.to_string())),
            ServerError::Remote { context, source } => (context.to_string(), Some(source.to_string())),
        };

        ErrorBody { error, details }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("request rejected: {}", self);
        }

        (status, Json(self.body())).into_response()
    }
}
