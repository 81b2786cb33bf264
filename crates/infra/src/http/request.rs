//! Request descriptors

use std::fmt;
use std::time::Duration;

use partnerdesk_domain::{PartnerDeskError, Result};
use reqwest::Method;
use serde::Serialize;

/// Everything needed to issue one logical JSON request.
///
/// Transport retries default on for `GET`, `HEAD` and `DELETE` and off for
/// everything else; see [`RequestDescriptor::retry_transport`].
#[derive(Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
    timeout: Option<Duration>,
    retry_transport: bool,
    authenticated: bool,
}

impl RequestDescriptor {
    /// Request for `path`, relative to the client base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let retry_transport = matches!(method, Method::GET | Method::HEAD | Method::DELETE);
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
            retry_transport,
            authenticated: true,
        }
    }

    /// `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serialise `body` as the JSON request body.
    ///
    /// # Errors
    /// Returns `PartnerDeskError::Internal` if `body` cannot be serialised.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let encoded = serde_json::to_string(body)
            .map_err(|err| PartnerDeskError::Internal(format!("request body encode: {err}")))?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Extra header sent on every attempt.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Per-attempt deadline overriding the client default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether timeouts, transport failures and unparseable bodies may be
    /// retried. HTTP error statuses are never retried.
    pub fn retry_transport(mut self, enabled: bool) -> Self {
        self.retry_transport = enabled;
        self
    }

    /// Never attach the session token (credential exchanges).
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extra headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Encoded JSON body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Per-attempt deadline, if overridden.
    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether transport failures may be retried.
    pub fn is_retry_eligible(&self) -> bool {
        self.retry_transport
    }

    /// Whether the session token is attached.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers.iter().map(|(name, _)| name).collect::<Vec<_>>())
            .field("body_len", &self.body.as_ref().map(String::len))
            .field("timeout", &self.timeout)
            .field("retry_transport", &self.retry_transport)
            .field("authenticated", &self.authenticated)
            .finish()
    }
}
