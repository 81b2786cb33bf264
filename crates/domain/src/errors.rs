//! Error types used throughout the application

use partnerdesk_common::validation::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PartnerDesk
///
/// Every variant renders a message fit to show a partner as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum PartnerDeskError {
    /// Client-side field check failed; never reaches the network.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Non-2xx response from the backend.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("Request timed out")]
    Timeout,

    /// Token refresh failed and the session was cleared.
    #[error("Session expired, please log in again")]
    AuthExpired,

    #[error("Upload failed: {reason}")]
    Upload { reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PartnerDeskError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Build an HTTP error, falling back to `HTTP {status}` when the body
    /// carried no message.
    pub fn http(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Http { status, message }
    }

    /// Whether a retry-eligible request may be attempted again after this
    /// error.
    ///
    /// Only local deadline expiry, transport failures and unparseable bodies
    /// qualify. HTTP errors are surfaced verbatim and uploads never retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_) | Self::Decode(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationError> for PartnerDeskError {
    fn from(err: ValidationError) -> Self {
        let field = err.first().map(|e| e.field.clone()).unwrap_or_default();
        Self::Validation { field, message: err.to_string() }
    }
}

/// Result type alias for PartnerDesk operations
pub type Result<T> = std::result::Result<T, PartnerDeskError>;
