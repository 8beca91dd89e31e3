//! Error types for cm-contacts
//!
//! Every failure of the contact service is normalized into one of two
//! variants. Their `Display` output is the message shown to the user; callers
//! never inspect the underlying transport error.

use thiserror::Error;
use tracing::error;

/// cm-contacts error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a usable response
    #[error("An error occurred: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Backend returned code {status}: {body}")]
    Backend { status: u16, body: String },
}

impl ServiceError {
    /// Normalize a client-side failure
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        error!("Contact request failed: {:?}", err);
        Self::Transport(err.to_string())
    }

    /// Normalize a non-success response body
    ///
    /// JSON bodies of the form `{"error": "..."}` contribute only their
    /// `error` field; anything else is passed through verbatim.
    pub(crate) fn backend(status: reqwest::StatusCode, body: &str) -> Self {
        error!("Contact backend returned {}: {}", status, body);
        let body = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string());

        Self::Backend {
            status: status.as_u16(),
            body,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ServiceError>;
