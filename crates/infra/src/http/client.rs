use std::sync::Arc;
use std::time::Duration;

use partnerdesk_common::resilience::{sleep_with_cancel, BackoffStrategy, RetryState, SleepOutcome};
use partnerdesk_domain::{ApiConfig, PartnerDeskError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use super::{endpoint_url, error_message, RequestDescriptor, USER_AGENT};
use crate::auth::{RefreshCoordinator, TokenStore};
use crate::errors::InfraError;

/// JSON client for the partner backend.
///
/// One call to [`RequestClient::request`] is one logical request: the
/// initial try, at most one replay after a token refresh, and transport
/// retries all draw from the same `retry_attempts` budget.
///
/// Cloning is cheap. Clones share the connection pool, token store and
/// refresh coordinator; [`RequestClient::scoped`] gives a clone its own
/// cancellation token.
#[derive(Clone)]
pub struct RequestClient {
    shared: Arc<Shared>,
    cancel: CancellationToken,
}

struct Shared {
    http: ReqwestClient,
    base_url: String,
    timeout: Duration,
    retry_attempts: u32,
    retry_delay: Duration,
    tokens: Arc<TokenStore>,
    refresher: RefreshCoordinator,
}

/// Why a single attempt did not produce a body.
enum AttemptError {
    /// 401, with the body's message if any.
    Unauthorized(Option<String>),
    Failed(PartnerDeskError),
}

impl RequestClient {
    /// Start building a new request client.
    pub fn builder(tokens: Arc<TokenStore>) -> RequestClientBuilder {
        RequestClientBuilder::new(tokens)
    }

    /// Client configured from the `[api]` config section.
    pub fn from_config(config: &ApiConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        Self::builder(tokens).api_config(config).build()
    }

    /// Same client, bound to `cancel`.
    ///
    /// Cancelling the token aborts in-flight attempts and backoff sleeps of
    /// requests issued through the returned client with
    /// `PartnerDeskError::Cancelled`.
    pub fn scoped(&self, cancel: CancellationToken) -> Self {
        Self { shared: self.shared.clone(), cancel }
    }

    /// Token whose cancellation aborts this client's requests.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Session token store.
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.shared.tokens
    }

    /// Coordinator used when a request comes back 401.
    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.shared.refresher
    }

    /// Base URL every request path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.shared.base_url
    }

    pub(crate) fn http(&self) -> &ReqwestClient {
        &self.shared.http
    }

    /// Issue `descriptor` and return the decoded JSON body (`Null` when the
    /// body is empty).
    pub async fn request(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let shared = &self.shared;
        let url = endpoint_url(&shared.base_url, descriptor.path())?;
        let timeout = descriptor.timeout_override().unwrap_or(shared.timeout);
        let method = descriptor.method();
        let path = descriptor.path();

        let mut retry =
            RetryState::new(shared.retry_attempts, BackoffStrategy::linear(shared.retry_delay));
        let mut refreshed = false;

        loop {
            let attempt = retry.attempt();
            let token =
                if descriptor.is_authenticated() { shared.tokens.access_token() } else { None };
            debug!(attempt, %method, path, authorized = token.is_some(), "sending request");

            let exchange = self.attempt(&url, descriptor, token.as_deref());
            let outcome = tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    debug!(attempt, %method, path, "request cancelled");
                    return Err(PartnerDeskError::Cancelled);
                }
                outcome = tokio::time::timeout(timeout, exchange) => {
                    outcome.unwrap_or(Err(AttemptError::Failed(PartnerDeskError::Timeout)))
                }
            };

            match outcome {
                Ok(body) => {
                    debug!(attempt, %method, path, "request succeeded");
                    return Ok(body);
                }
                Err(AttemptError::Unauthorized(message)) => match token {
                    Some(stale) if !refreshed && retry.can_retry() => {
                        warn!(attempt, %method, path, "access token rejected, refreshing");
                        tokio::select! {
                            biased;
                            () = self.cancel.cancelled() => return Err(PartnerDeskError::Cancelled),
                            result = shared.refresher.refresh(&stale) => { result?; }
                        }
                        refreshed = true;
                        retry.advance();
                    }
                    _ => {
                        debug!(attempt, %method, path, refreshed, "request unauthorized");
                        let status = StatusCode::UNAUTHORIZED.as_u16();
                        return Err(PartnerDeskError::http(status, message));
                    }
                },
                Err(AttemptError::Failed(err)) => {
                    let retryable = descriptor.is_retry_eligible() && err.is_retryable();
                    if !(retryable && retry.can_retry()) {
                        debug!(attempt, %method, path, error = %err, "request failed");
                        return Err(err);
                    }

                    let delay = retry.next_delay();
                    warn!(
                        attempt,
                        %method,
                        path,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "request failed, retrying"
                    );
                    if sleep_with_cancel(delay, &self.cancel).await == SleepOutcome::Cancelled {
                        return Err(PartnerDeskError::Cancelled);
                    }
                    retry.advance();
                }
            }
        }
    }

    /// [`RequestClient::request`], decoding the body into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T> {
        let body = self.request(descriptor).await?;
        serde_json::from_value(body).map_err(|err| InfraError::from(err).into())
    }

    async fn attempt(
        &self,
        url: &Url,
        descriptor: &RequestDescriptor,
        token: Option<&str>,
    ) -> std::result::Result<Value, AttemptError> {
        let failed = |err: reqwest::Error| AttemptError::Failed(InfraError::from(err).into());

        let mut builder = self
            .shared
            .http
            .request(descriptor.method().clone(), url.clone())
            .header(ACCEPT, "application/json");
        for (name, value) in descriptor.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = descriptor.body() {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body.to_owned());
        }

        let response = builder.send().await.map_err(failed)?;
        let status = response.status();
        let body = response.text().await.map_err(failed)?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(AttemptError::Unauthorized(error_message(&body)));
        }
        if !status.is_success() {
            return Err(AttemptError::Failed(PartnerDeskError::http(
                status.as_u16(),
                error_message(&body),
            )));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|err| AttemptError::Failed(InfraError::from(err).into()))
    }
}

/// Builder for [`RequestClient`].
pub struct RequestClientBuilder {
    tokens: Arc<TokenStore>,
    api: ApiConfig,
    user_agent: String,
    cancel: Option<CancellationToken>,
}

impl RequestClientBuilder {
    fn new(tokens: Arc<TokenStore>) -> Self {
        Self { tokens, api: ApiConfig::default(), user_agent: USER_AGENT.to_string(), cancel: None }
    }

    /// Take base URL, timeout and retry settings from `config`.
    pub fn api_config(mut self, config: &ApiConfig) -> Self {
        self.api = config.clone();
        self
    }

    /// Backend base URL; paths are joined onto it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Per-attempt deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.api.timeout = timeout;
        self
    }

    /// Retries available after the initial try.
    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.api.retry_attempts = attempts;
        self
    }

    /// Base of the linear backoff schedule.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.api.retry_delay = delay;
        self
    }

    /// `User-Agent` header value.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Bind the built client to `cancel`.
    pub fn cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// # Errors
    /// Returns `PartnerDeskError::Config` if the base URL is invalid, or the
    /// converted reqwest error if the HTTP client cannot be created.
    pub fn build(self) -> Result<RequestClient> {
        endpoint_url(&self.api.base_url, "/")?;

        let http = ReqwestClient::builder()
            .no_proxy()
            .user_agent(self.user_agent)
            .build()
            .map_err(InfraError::from)?;

        let refresher = RefreshCoordinator::new(
            http.clone(),
            &self.api.base_url,
            self.api.timeout,
            self.tokens.clone(),
        )?;

        Ok(RequestClient {
            shared: Arc::new(Shared {
                http,
                base_url: self.api.base_url,
                timeout: self.api.timeout,
                retry_attempts: self.api.retry_attempts,
                retry_delay: self.api.retry_delay,
                tokens: self.tokens,
                refresher,
            }),
            cancel: self.cancel.unwrap_or_default(),
        })
    }
}
