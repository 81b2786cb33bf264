//! Response envelope shared by every backend endpoint

use serde::{Deserialize, Serialize};

/// `{ success, data?, message?, token?, refreshToken? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Envelope whose payload callers do not inspect.
pub type Acknowledgement = ApiEnvelope<serde_json::Value>;

impl<T> Default for ApiEnvelope<T> {
    fn default() -> Self {
        Self { success: false, data: None, message: None, token: None, refresh_token: None }
    }
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), ..Self::default() }
    }

    /// Unsuccessful envelope with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Self::default() }
    }

    /// Payload of a successful envelope.
    pub fn success_data(&self) -> Option<&T> {
        if self.success {
            self.data.as_ref()
        } else {
            None
        }
    }

    /// Server message, or `fallback` when absent.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(fallback)
    }
}
