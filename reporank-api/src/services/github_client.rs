//! GitHub search API client
//!
//! One operation: a single paginated search call with sort parameters. The
//! client classifies failures into [`UpstreamError`] variants and does
//! nothing else; retry and backoff decisions belong to the orchestrator.

use async_trait::async_trait;
use reporank_common::config::GithubConfig;
use reporank_common::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error as ThisError;
use tokio::sync::Mutex;

use crate::models::{SearchResponse, SortField, SortOrder};

const USER_AGENT: &str = concat!("reporank/", env!("CARGO_PKG_VERSION"));

/// Classified upstream failure.
///
/// Carries enough detail for logging; the generic caller-facing message is
/// produced by [`UpstreamError::into_service_error`].
#[derive(Debug, ThisError)]
pub enum UpstreamError {
    /// Status 422: upstream cannot process the query for this page
    #[error("unprocessable query")]
    Unprocessable,

    /// Any other 4xx
    #[error("client error: status {status}")]
    Client { status: u16 },

    /// 5xx
    #[error("server error: status {status}")]
    Server { status: u16 },

    /// Network failure or timeout before a response arrived
    #[error("connection error: {0}")]
    Connection(String),

    /// Anything unclassified, including payload parse failures
    #[error("unexpected error: {0}")]
    Other(String),
}

impl UpstreamError {
    /// Server errors and connection failures are worth another attempt;
    /// everything else fails the page immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, UpstreamError::Server { .. } | UpstreamError::Connection(_))
    }

    /// Map to the service taxonomy once the failure is final.
    pub fn into_service_error(self) -> Error {
        match self {
            UpstreamError::Unprocessable => Error::UpstreamUnprocessable,
            UpstreamError::Client { .. } => Error::UpstreamClient,
            UpstreamError::Server { .. } => Error::UpstreamServer,
            UpstreamError::Connection(_) => Error::UpstreamConnection,
            UpstreamError::Other(_) => Error::Internal,
        }
    }
}

/// The one upstream operation the search core consumes.
#[async_trait]
pub trait SearchUpstream: Send + Sync {
    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        sort: SortField,
        order: SortOrder,
    ) -> Result<SearchResponse, UpstreamError>;
}

/// Minimum-interval rate limiter shared by sequential probe calls
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with the rate limit
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// GitHub search API client backed by a shared reqwest connection pool
pub struct GithubClient {
    http_client: reqwest::Client,
    base_url: Arc<str>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl SearchUpstream for GithubClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        sort: SortField,
        order: SortOrder,
    ) -> Result<SearchResponse, UpstreamError> {
        // The query already carries `+` clause separators; spaces inside the
        // keywords become separators too. Built by hand because a form
        // encoder would mangle the qualifier syntax.
        let url = format!(
            "{}/search/repositories?q={}&sort={}&order={}&page={}&per_page={}",
            self.base_url,
            query.replace(' ', "+"),
            sort.as_str(),
            order.as_str(),
            page,
            per_page,
        );

        tracing::debug!(page, sort = sort.as_str(), order = order.as_str(), "Querying GitHub search API");

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    UpstreamError::Connection(e.to_string())
                } else {
                    UpstreamError::Other(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if let Some(err) = classify_status(status) {
            // Body text stays in the logs; error values carry the status only
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(page, status, body = %body, "Upstream search call failed");
            return Err(err);
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| UpstreamError::Other(format!("payload parse failure: {}", e)))
    }
}

/// Classify a non-success HTTP status; `None` means the call succeeded.
fn classify_status(status: u16) -> Option<UpstreamError> {
    match status {
        200..=299 => None,
        422 => Some(UpstreamError::Unprocessable),
        400..=499 => Some(UpstreamError::Client { status }),
        500..=599 => Some(UpstreamError::Server { status }),
        _ => Some(UpstreamError::Other(format!("unexpected status {}", status))),
    }
}
