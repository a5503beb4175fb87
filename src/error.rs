// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! The central distinction is between *transport* failures (the request
//! never completed, so it is retried) and *upstream status* failures (the
//! request completed with a non-success code and is never retried).

use std::fmt;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A catalog row violates the at-least-one-language invariant, or the
    /// catalog is otherwise unusable. Fatal: aborts generation.
    #[error("Corrupt catalog: {0}")]
    CatalogInvariant(String),

    /// The requested content id is absent from the whole sequence.
    /// Per-route outcome; never aborts generation of other routes.
    #[error("No catalog row carries content id '{content_id}'")]
    RouteNotFound { content_id: String },

    /// The request never completed (connection refused, reset, DNS, TLS).
    #[error("Network failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A fetch attempt exceeded its time budget and was aborted.
    #[error("Fetch of {url} timed out after {after_ms}ms")]
    Timeout { url: String, after_ms: u64 },

    /// The request completed but the upstream reported a non-success status.
    #[error("Content API returned HTTP {status} for {url}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidApiBase { url: String, reason: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Domain vocabulary for why a content fetch degraded to a placeholder.
///
/// This is not an error type — it's a classification of the failure reason,
/// carried on the degraded record so the placeholder body and the logs can
/// name what actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// Every attempt exceeded the per-attempt time budget.
    Timeout,
    /// Every attempt failed at the transport level before completing.
    Connection,
    /// The upstream completed with a non-success status code.
    Status(u16),
    /// The upstream completed with 2xx but the payload was unusable.
    Malformed,
}

impl DegradedReason {
    /// Classifies a fetch error into the degradation vocabulary.
    pub fn classify(error: &AppError) -> Self {
        match error {
            AppError::Timeout { .. } => Self::Timeout,
            AppError::Transport(_) => Self::Connection,
            AppError::UpstreamStatus { status, .. } => Self::Status(status.as_u16()),
            _ => Self::Malformed,
        }
    }
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connection => write!(f, "connection failure"),
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Malformed => write!(f, "malformed payload"),
        }
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;
