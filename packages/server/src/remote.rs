use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Failure talking to a remote identity or document service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Remote service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Transport failures, throttling and server-side errors are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Transport(_) => true,
            RemoteError::Status { status, .. } => *status == 429 || *status >= 500,
            RemoteError::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else {
            RemoteError::Transport(e.to_string())
        }
    }
}

/// Shared HTTP client; holds no credentials
pub fn http_client(timeout_ms: u64) -> Result<reqwest::Client, RemoteError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(RemoteError::from)
}

/// Send a request and decode a JSON body, turning non-2xx into `RemoteError::Status`
pub async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, RemoteError> {
    let response = checked(request).await?;
    response.json::<T>().await.map_err(|e| RemoteError::Decode(e.to_string()))
}

/// Send a request, ignoring any successful body
pub async fn send(request: reqwest::RequestBuilder) -> Result<(), RemoteError> {
    checked(request).await.map(|_| ())
}

async fn checked(request: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
