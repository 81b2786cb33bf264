//! Access-token refresh
//!
//! One refresh runs at a time. A caller that queued behind a refresh which
//! already replaced its stale token gets the new token without calling the
//! endpoint again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex as StateLock;
use partnerdesk_domain::constants::REFRESH_PATH;
use partnerdesk_domain::{PartnerDeskError, RefreshRequest, RefreshResponse, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::TokenStore;
use crate::errors::InfraError;
use crate::http::endpoint_url;

/// Outcome of the most recent refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshState {
    /// No refresh in flight; also the state after a cancelled refresh.
    #[default]
    Idle,
    /// A refresh request is in flight.
    Refreshing,
    /// The last refresh stored a new access token.
    Refreshed,
    /// The last refresh was rejected and the session was cleared.
    Failed,
}

/// Puts the state back to `Idle` if a refresh is dropped mid-flight.
struct InFlight<'a> {
    state: &'a StateLock<RefreshState>,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a StateLock<RefreshState>) -> Self {
        *state.lock() = RefreshState::Refreshing;
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if *state == RefreshState::Refreshing {
            *state = RefreshState::Idle;
        }
    }
}

/// Serializes access-token refreshes for one session.
pub struct RefreshCoordinator {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
    tokens: Arc<TokenStore>,
    gate: Mutex<()>,
    state: StateLock<RefreshState>,
    calls: AtomicU64,
}

impl RefreshCoordinator {
    /// Build a coordinator posting to `base_url`'s refresh endpoint.
    ///
    /// # Errors
    /// Returns `PartnerDeskError::Config` if `base_url` cannot form the
    /// refresh endpoint.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        timeout: Duration,
        tokens: Arc<TokenStore>,
    ) -> Result<Self> {
        Ok(Self {
            http,
            endpoint: endpoint_url(base_url, REFRESH_PATH)?,
            timeout,
            tokens,
            gate: Mutex::new(()),
            state: StateLock::new(RefreshState::Idle),
            calls: AtomicU64::new(0),
        })
    }

    /// Outcome of the latest refresh, or `Refreshing` while one runs.
    pub fn state(&self) -> RefreshState {
        *self.state.lock()
    }

    /// Number of times the refresh endpoint has been called.
    pub fn endpoint_calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// `stale_token` is the access token the 401'd request carried. Dropping
    /// the returned future mid-flight leaves the state `Idle` and the stored
    /// tokens untouched.
    ///
    /// # Errors
    /// Returns `PartnerDeskError::AuthExpired` when no refresh token exists or
    /// the endpoint rejects it; both tokens are cleared first.
    pub async fn refresh(&self, stale_token: &str) -> Result<String> {
        let _gate = self.gate.lock().await;
        *self.state.lock() = RefreshState::Idle;

        if let Some(current) = self.tokens.access_token() {
            if current != stale_token {
                debug!("Token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let _in_flight = InFlight::start(&self.state);

        let Some(refresh_token) = self.tokens.refresh_token() else {
            warn!("Access token rejected and no refresh token is stored");
            return self.fail().await;
        };

        match self.exchange(refresh_token).await {
            Ok(response) => match response.token {
                Some(token) if !token.is_empty() => {
                    self.tokens.update_access_token(token.clone(), response.refresh_token).await?;
                    *self.state.lock() = RefreshState::Refreshed;
                    info!("Access token refreshed");
                    Ok(token)
                }
                _ => {
                    warn!("Refresh response carried no token");
                    self.fail().await
                }
            },
            Err(err) => {
                warn!(error = %err, "Token refresh failed");
                self.fail().await
            }
        }
    }

    async fn exchange(&self, refresh_token: String) -> Result<RefreshResponse> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let response = self
            .http
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(InfraError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PartnerDeskError::http(status.as_u16(), None));
        }

        response.json::<RefreshResponse>().await.map_err(|err| InfraError::from(err).into())
    }

    async fn fail(&self) -> Result<String> {
        *self.state.lock() = RefreshState::Failed;
        if let Err(err) = self.tokens.clear_tokens().await {
            warn!(error = %err, "Failed to clear tokens after refresh failure");
        }
        Err(PartnerDeskError::AuthExpired)
    }
}
