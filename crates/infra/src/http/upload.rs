//! Multipart uploads with progress
//!
//! File parts are streamed in fixed-size chunks. Progress advances as each
//! chunk is handed to the transport and is capped at 99 until the server
//! accepts the upload, at which point it reports 100.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use partnerdesk_core::ProgressCallback;
use partnerdesk_domain::{FileAttachment, PartnerDeskError, Result, UploadForm};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client as ReqwestClient};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{endpoint_url, error_message, RequestClient};
use crate::auth::TokenStore;

const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

const UPLOAD_TIMEOUT_REASON: &str = "Upload timeout";
const NETWORK_ERROR_REASON: &str = "Network error";

/// Single-attempt multipart client.
///
/// Uploads are never retried, not even after a 401.
#[derive(Clone)]
pub struct UploadClient {
    http: ReqwestClient,
    base_url: Arc<str>,
    timeout: Duration,
    tokens: Arc<TokenStore>,
    cancel: CancellationToken,
}

impl UploadClient {
    pub fn new(
        http: ReqwestClient,
        base_url: &str,
        timeout: Duration,
        tokens: Arc<TokenStore>,
    ) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url),
            timeout,
            tokens,
            cancel: CancellationToken::new(),
        }
    }

    /// Upload client sharing `client`'s connection pool, token store and
    /// cancellation token.
    pub fn from_request_client(client: &RequestClient, timeout: Duration) -> Self {
        Self {
            http: client.http().clone(),
            base_url: Arc::from(client.base_url()),
            timeout,
            tokens: client.tokens().clone(),
            cancel: client.cancellation_token().clone(),
        }
    }

    /// Same client, bound to `cancel`.
    pub fn scoped(&self, cancel: CancellationToken) -> Self {
        Self { cancel, ..self.clone() }
    }

    /// POST `form` to `path` as `multipart/form-data`.
    ///
    /// A 2xx body that is not JSON comes back as a JSON string.
    ///
    /// # Errors
    /// - `PartnerDeskError::Upload` on transport failure or deadline expiry
    /// - `PartnerDeskError::Http` on a non-2xx response
    /// - `PartnerDeskError::Cancelled` when the client's token fires
    pub async fn upload(
        &self,
        path: &str,
        form: &UploadForm,
        progress: ProgressCallback,
    ) -> Result<Value> {
        let url = endpoint_url(&self.base_url, path)?;
        let total_bytes = form.total_file_bytes();
        let tracker = Arc::new(ProgressTracker::new(total_bytes, progress));
        tracker.report(0);

        let multipart = build_form(form, &tracker)?;
        let mut builder = self.http.post(url).multipart(multipart);
        if let Some(token) = self.tokens.access_token() {
            builder = builder.bearer_auth(token);
        }

        info!(path, files = form.files.len(), total_bytes, "starting upload");

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(path, "upload cancelled");
                return Err(PartnerDeskError::Cancelled);
            }
            result = tokio::time::timeout(self.timeout, exchange) => match result {
                Err(_) => {
                    warn!(path, timeout_ms = self.timeout.as_millis() as u64, "upload timed out");
                    return Err(upload_failed(UPLOAD_TIMEOUT_REASON));
                }
                Ok(Err(err)) => {
                    warn!(path, error = %err, "upload transport failure");
                    let reason =
                        if err.is_timeout() { UPLOAD_TIMEOUT_REASON } else { NETWORK_ERROR_REASON };
                    return Err(upload_failed(reason));
                }
                Ok(Ok(exchange)) => exchange,
            }
        };

        if !status.is_success() {
            warn!(path, status = status.as_u16(), "upload rejected");
            return Err(PartnerDeskError::http(status.as_u16(), error_message(&body)));
        }

        tracker.report(100);
        info!(path, status = status.as_u16(), "upload complete");

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

fn upload_failed(reason: &str) -> PartnerDeskError {
    PartnerDeskError::Upload { reason: reason.to_string() }
}

fn build_form(form: &UploadForm, tracker: &Arc<ProgressTracker>) -> Result<Form> {
    let mut multipart = Form::new();
    for (name, value) in &form.fields {
        multipart = multipart.text(name.clone(), value.clone());
    }
    for (name, file) in &form.files {
        multipart = multipart.part(name.clone(), file_part(file, tracker.clone())?);
    }
    Ok(multipart)
}

fn file_part(file: &FileAttachment, tracker: Arc<ProgressTracker>) -> Result<Part> {
    let chunks: Vec<Vec<u8>> = file.bytes.chunks(UPLOAD_CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        tracker.advance(chunk.len() as u64);
        Ok::<_, std::io::Error>(chunk)
    }));

    Part::stream_with_length(Body::wrap_stream(stream), file.bytes.len() as u64)
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)
        .map_err(|_| {
            PartnerDeskError::validation(
                file.file_name.clone(),
                format!("Unsupported file type: {}", file.mime_type),
            )
        })
}

/// Turns bytes sent into whole, non-decreasing percentages.
struct ProgressTracker {
    total: u64,
    sent: AtomicU64,
    last: Mutex<Option<u8>>,
    callback: ProgressCallback,
}

impl ProgressTracker {
    fn new(total: u64, callback: ProgressCallback) -> Self {
        Self { total, sent: AtomicU64::new(0), last: Mutex::new(None), callback }
    }

    fn advance(&self, bytes: u64) {
        let sent = self.sent.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if self.total > 0 {
            let percent = (sent.saturating_mul(100) / self.total).min(99);
            self.report(percent as u8);
        }
    }

    /// Forward `percent` unless it would not move the bar forward.
    fn report(&self, percent: u8) {
        let mut last = self.last.lock();
        if last.map_or(true, |previous| percent > previous) {
            *last = Some(percent);
            (self.callback)(percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> (ProgressCallback, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (Arc::new(move |percent| sink.lock().push(percent)), seen)
    }

    #[test]
    fn tracker_caps_at_99_until_finished() {
        let (callback, seen) = recording();
        let tracker = ProgressTracker::new(200, callback);

        tracker.report(0);
        tracker.advance(100);
        tracker.advance(100);
        tracker.report(100);

        assert_eq!(*seen.lock(), vec![0, 50, 99, 100]);
    }

    #[test]
    fn tracker_never_goes_backwards_or_repeats() {
        let (callback, seen) = recording();
        let tracker = ProgressTracker::new(1000, callback);

        tracker.report(0);
        tracker.advance(1);
        tracker.report(0);
        tracker.advance(500);

        assert_eq!(*seen.lock(), vec![0, 50]);
    }

    #[test]
    fn form_without_files_reports_only_endpoints() {
        let (callback, seen) = recording();
        let tracker = ProgressTracker::new(0, callback);

        tracker.report(0);
        tracker.advance(0);
        tracker.report(100);

        assert_eq!(*seen.lock(), vec![0, 100]);
    }

    #[test]
    fn invalid_mime_type_is_a_validation_error() {
        let (callback, _) = recording();
        let tracker = Arc::new(ProgressTracker::new(1, callback));
        let file = FileAttachment::new("a.jpg", "not a mime", vec![1]);

        let err = file_part(&file, tracker).unwrap_err();

        assert!(matches!(err, PartnerDeskError::Validation { .. }));
    }
}
