//! Shared test helpers: scripted upstream mock and fixture builders
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reporank_api::models::{RepositoryItem, SearchResponse, SortField, SortOrder};
use reporank_api::services::{SearchUpstream, UpstreamError};
use reporank_common::config::SearchConfig;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// (page, sort, order) identifies one upstream call shape
pub type CallKey = (u32, SortField, SortOrder);

/// Scripted in-memory upstream. Each (page, sort, order) key holds a queue of
/// canned results consumed one per call; unscripted calls answer with an
/// empty success so probes and trailing pages never fail by accident.
pub struct MockUpstream {
    scripted: Mutex<HashMap<CallKey, VecDeque<Result<SearchResponse, UpstreamError>>>>,
    calls: Mutex<Vec<CallKey>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue one canned result for the given call shape.
    pub fn script(
        &self,
        page: u32,
        sort: SortField,
        order: SortOrder,
        result: Result<SearchResponse, UpstreamError>,
    ) {
        self.scripted
            .lock()
            .unwrap()
            .entry((page, sort, order))
            .or_default()
            .push_back(result);
    }

    /// How many times the given call shape was invoked.
    pub fn call_count(&self, page: u32, sort: SortField, order: SortOrder) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|key| **key == (page, sort, order))
            .count()
    }
}

#[async_trait]
impl SearchUpstream for MockUpstream {
    async fn search(
        &self,
        _query: &str,
        page: u32,
        _per_page: u32,
        sort: SortField,
        order: SortOrder,
    ) -> Result<SearchResponse, UpstreamError> {
        self.calls.lock().unwrap().push((page, sort, order));

        let mut scripted = self.scripted.lock().unwrap();
        if let Some(queue) = scripted.get_mut(&(page, sort, order)) {
            if let Some(result) = queue.pop_front() {
                return result;
            }
        }

        Ok(SearchResponse::empty())
    }
}

/// Repository fixture with predictable identity fields
pub fn repo(id: u64, stars: u64, forks: u64) -> RepositoryItem {
    RepositoryItem {
        id,
        name: format!("repo-{}", id),
        html_url: format!("https://github.com/acme/repo-{}", id),
        stargazers_count: stars,
        forks_count: forks,
        language: Some("Rust".to_string()),
        created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
    }
}

/// Successful one-page response wrapping the given items
pub fn response_with(items: Vec<RepositoryItem>) -> SearchResponse {
    SearchResponse {
        total_count: items.len() as u64,
        incomplete_results: false,
        items,
    }
}

/// Orchestration settings with millisecond delays so retry/backoff paths run
/// fast under test.
pub fn test_settings() -> SearchConfig {
    SearchConfig {
        default_max_pages: 5,
        max_pages_ceiling: 10,
        page_size: 100,
        max_concurrent_pages: 4,
        probe_delay_ms: 1,
        retry_max_attempts: 3,
        retry_base_delay_ms: 1,
    }
}
