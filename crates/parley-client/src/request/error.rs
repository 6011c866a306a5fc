use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: StatusCode, body: Value },
    /// The backend answered with a non-success envelope code.
    #[error("{message}")]
    Api { code: i64, message: String },
    #[error("request cancelled")]
    Cancelled,
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("failed to build http client: {0}")]
    Build(String),
}

impl RequestError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Message the backend attached to the failure, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            Self::Status { body, .. } => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Network(format!("request timed out: {e}"));
        }
        Self::Network(e.to_string())
    }
}
