//! Session state persisted between runs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by `/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token }
    }

    /// Pair with a refreshed access token, keeping the refresh token.
    #[must_use]
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: self.refresh_token.clone() }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Everything the client keeps across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenPair>,
    /// Phone number prefilled on the next hotel-partner login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remembered_phone: Option<String>,
}

impl StoredSession {
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().and_then(|t| t.refresh_token.as_deref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_tokens() {
        let pair = TokenPair::new("secret-access", Some("secret-refresh".into()));
        let rendered = format!("{pair:?}");

        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn refreshed_pair_keeps_refresh_token() {
        let pair = TokenPair::new("old", Some("r".into()));
        let next = pair.with_access_token("new");

        assert_eq!(next.access_token, "new");
        assert_eq!(next.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn empty_session_serializes_to_empty_object() {
        let json = serde_json::to_string(&StoredSession::default()).unwrap();
        assert_eq!(json, "{}");

        let parsed: StoredSession = serde_json::from_str("{}").unwrap();
        assert!(!parsed.is_authenticated());
    }
}
