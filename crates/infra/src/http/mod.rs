//! HTTP transport for the partner backend
//!
//! - [`RequestClient`]: JSON requests with bearer auth, 401 refresh-and-replay,
//!   linear backoff and cancellation
//! - [`UploadClient`]: single-attempt multipart uploads with progress

pub mod client;
pub mod request;
pub mod upload;

use partnerdesk_domain::{PartnerDeskError, Result};
use url::Url;

use crate::errors::InfraError;

pub use client::{RequestClient, RequestClientBuilder};
pub use request::RequestDescriptor;
pub use upload::UploadClient;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("partnerdesk/", env!("CARGO_PKG_VERSION"));

/// Join `path` onto `base_url`, keeping any path prefix the base carries
/// (`https://host/api` + `/auth/login` → `https://host/api/auth/login`).
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    let url = Url::parse(&joined).map_err(InfraError::from)?;

    if url.cannot_be_a_base() {
        return Err(PartnerDeskError::Config(format!("not a valid API URL: {joined}")));
    }
    Ok(url)
}

/// The `message` field of a JSON error body, if there is one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}
