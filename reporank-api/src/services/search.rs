//! Search orchestration
//!
//! Runs the normalization probes and the page fan-out concurrently, merges
//! the page items, derives the scoring bounds, and hands everything to the
//! scoring stage. Page fetches share a process-wide worker limit; probes are
//! sequential behind a rate limiter because upstream throttles bursts of
//! sorted single-item queries.

use chrono::NaiveDate;
use futures::future;
use reporank_common::config::SearchConfig;
use reporank_common::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use super::github_client::{RateLimiter, SearchUpstream, UpstreamError};
use super::retry::RetryPolicy;
use super::{query, scoring};
use crate::models::{RankedRepository, RepositoryItem, SearchBounds, SearchRequest, SortField, SortOrder};

/// Terminal outcome of one page fetch attempt. An unprocessable page is a
/// normal zero-item outcome, not a failure.
#[derive(Debug)]
enum PageOutcome {
    Items(Vec<RepositoryItem>),
    Empty,
}

/// Star/fork extremes learned from the probe queries. Max forks is derived
/// from the fetched page set instead, so it is absent here.
#[derive(Debug, Default)]
struct ProbedBounds {
    min_stars: u64,
    max_stars: u64,
    min_forks: u64,
}

/// Orchestrates probe and page fetching against the upstream client and
/// produces the ranked result list.
pub struct SearchService {
    upstream: Arc<dyn SearchUpstream>,
    settings: SearchConfig,
    retry: RetryPolicy,
    page_permits: Arc<Semaphore>,
    probe_limiter: RateLimiter,
}

impl SearchService {
    pub fn new(upstream: Arc<dyn SearchUpstream>, settings: SearchConfig) -> Self {
        let retry = RetryPolicy::new(
            settings.retry_max_attempts,
            Duration::from_millis(settings.retry_base_delay_ms),
        );
        let page_permits = Arc::new(Semaphore::new(settings.max_concurrent_pages));
        let probe_limiter = RateLimiter::new(settings.probe_delay_ms);

        Self {
            upstream,
            settings,
            retry,
            page_permits,
            probe_limiter,
        }
    }

    /// Run the full search: concurrent probes + page fan-out, bounds
    /// derivation, scoring, ranking. `today` is the reference date for
    /// recency labels.
    pub async fn search(
        &self,
        request: &SearchRequest,
        today: NaiveDate,
    ) -> Result<Vec<RankedRepository>> {
        let query = query::build_query(request);
        let max_pages = request
            .max_pages()
            .unwrap_or(self.settings.default_max_pages)
            .min(self.settings.max_pages_ceiling);

        info!(query = %query, max_pages, "Searching repositories");

        let (probed, items) = tokio::join!(
            self.fetch_probed_bounds(&query),
            self.fetch_pages(&query, max_pages),
        );
        let items = items?;

        // Pages are sorted by forks descending, so the merged set itself
        // carries the population's fork maximum; no fourth probe needed.
        let max_forks = items.iter().map(|item| item.forks_count).max().unwrap_or(0);

        let bounds = SearchBounds {
            min_stars: probed.min_stars,
            max_stars: probed.max_stars,
            min_forks: probed.min_forks,
            max_forks,
        };

        info!(
            min_stars = bounds.min_stars,
            max_stars = bounds.max_stars,
            min_forks = bounds.min_forks,
            max_forks = bounds.max_forks,
            repositories = items.len(),
            "Search completed"
        );

        Ok(scoring::score_and_rank(&items, bounds, today))
    }

    /// Sequential single-item probe queries, rate-limited between calls.
    /// Probes are advisory: any failure defaults the bound to 0.
    async fn fetch_probed_bounds(&self, query: &str) -> ProbedBounds {
        debug!("Fetching normalization bounds via probe queries");

        let min_stars = self.probe(query, SortField::Stars, SortOrder::Asc, "min stars").await;
        let min_forks = self.probe(query, SortField::Forks, SortOrder::Asc, "min forks").await;
        let max_stars = self.probe(query, SortField::Stars, SortOrder::Desc, "max stars").await;

        ProbedBounds {
            min_stars,
            max_stars,
            min_forks,
        }
    }

    async fn probe(&self, query: &str, sort: SortField, order: SortOrder, description: &str) -> u64 {
        self.probe_limiter.wait().await;

        match self.upstream.search(query, 1, 1, sort, order).await {
            Ok(response) => match response.items.first() {
                Some(item) => {
                    let value = match sort {
                        SortField::Stars => item.stargazers_count,
                        SortField::Forks => item.forks_count,
                    };
                    debug!(probe = description, value, "Probe bound found");
                    value
                }
                None => {
                    debug!(probe = description, "No results for probe, defaulting bound to 0");
                    0
                }
            },
            Err(err) => {
                warn!(probe = description, error = %err, "Probe failed, defaulting bound to 0");
                0
            }
        }
    }

    /// Fetch pages 1..=max_pages concurrently and merge their items. The
    /// first fatal page failure fails the whole request; sibling fetches
    /// still in flight are dropped.
    async fn fetch_pages(&self, query: &str, max_pages: u32) -> Result<Vec<RepositoryItem>> {
        debug!(max_pages, "Fetching result pages concurrently");

        let fetches = (1..=max_pages).map(|page| self.fetch_page(query, page));
        let pages = future::try_join_all(fetches).await?;

        Ok(pages.into_iter().flatten().collect())
    }

    /// One page through the worker limit and the retry policy.
    async fn fetch_page(&self, query: &str, page: u32) -> Result<Vec<RepositoryItem>> {
        let _permit = self
            .page_permits
            .acquire()
            .await
            .map_err(|_| Error::Internal)?;

        let outcome = self
            .retry
            .run("page fetch", || self.attempt_page(query, page))
            .await;

        match outcome {
            Ok(PageOutcome::Items(items)) => {
                debug!(page, items = items.len(), "Page fetched");
                Ok(items)
            }
            Ok(PageOutcome::Empty) => {
                debug!(page, "Page empty");
                Ok(Vec::new())
            }
            Err(err) => {
                error!(page, error = %err, "Page fetch failed");
                Err(err.into_service_error())
            }
        }
    }

    /// Single fetch attempt, classified into a tagged outcome. Retryable
    /// errors pass through for the retry policy to judge.
    async fn attempt_page(&self, query: &str, page: u32) -> std::result::Result<PageOutcome, UpstreamError> {
        let response = match self
            .upstream
            .search(query, page, self.settings.page_size, SortField::Forks, SortOrder::Desc)
            .await
        {
            Ok(response) => response,
            Err(UpstreamError::Unprocessable) => {
                debug!(page, "Upstream rejected page as unprocessable, treating as empty");
                return Ok(PageOutcome::Empty);
            }
            Err(err) => return Err(err),
        };

        if response.incomplete_results {
            warn!(page, "Upstream reports incomplete results");
        }

        if response.items.is_empty() {
            Ok(PageOutcome::Empty)
        } else {
            Ok(PageOutcome::Items(response.items))
        }
    }
}
