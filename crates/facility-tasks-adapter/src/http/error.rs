/*
[INPUT]:  Error sources (HTTP transport, API status, serialization, config)
[OUTPUT]: Structured error types with status context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Status line of a failed response: numeric code plus its reason text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    pub code: u16,
    pub text: String,
}

/// Main error type for the facility task adapter
#[derive(Error, Debug)]
pub enum FacilityError {
    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error (code {code}): {text}")]
    Api { code: u16, text: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request did not complete in time
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl FacilityError {
    /// Create an API error from a status code.
    ///
    /// The text is the canonical reason phrase; `body` is only used when the
    /// status has none.
    pub fn api_error(status: StatusCode, body: impl Into<String>) -> Self {
        let text = match status.canonical_reason() {
            Some(reason) => reason.to_string(),
            None => body.into(),
        };
        FacilityError::Api {
            code: status.as_u16(),
            text,
        }
    }

    /// Response status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<ResponseStatus> {
        match self {
            FacilityError::Api { code, text } => Some(ResponseStatus {
                code: *code,
                text: text.clone(),
            }),
            FacilityError::Http(err) => err.status().map(|status| ResponseStatus {
                code: status.as_u16(),
                text: status.canonical_reason().unwrap_or_default().to_string(),
            }),
            _ => None,
        }
    }

    /// Check if the server reported the addressed entity as missing
    pub fn is_not_found(&self) -> bool {
        self.status()
            .is_some_and(|status| status.code == StatusCode::NOT_FOUND.as_u16())
    }

    /// Human-readable status text; falls back to the error message when no
    /// status was received.
    pub fn status_text(&self) -> String {
        match self.status() {
            Some(status) if !status.text.is_empty() => status.text,
            _ => self.to_string(),
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            FacilityError::Http(_)
            | FacilityError::Timeout { .. }
            | FacilityError::InvalidResponse(_) => true,
            FacilityError::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

/// Result type alias for facility task operations
pub type Result<T> = std::result::Result<T, FacilityError>;
