//! GitHub search API payload types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of the upstream search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total matches upstream reports for the whole query
    pub total_count: u64,
    /// Upstream truncated its own search before completing
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<RepositoryItem>,
}

impl SearchResponse {
    /// The zero-item response used when upstream rejects a page as
    /// unprocessable.
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            incomplete_results: false,
            items: Vec::new(),
        }
    }
}

/// One repository in the upstream search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryItem {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Sort field accepted by the upstream search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Stars,
    Forks,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::Forks => "forks",
        }
    }
}

/// Sort direction accepted by the upstream search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Population extremes used to normalize raw counts into a comparable scale.
///
/// Star bounds come from probe queries, fork bounds partly from the fetched
/// page set; probes and pages run independently, so the bounds are
/// best-effort rather than exact extremes of the merged items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBounds {
    pub min_stars: u64,
    pub max_stars: u64,
    pub min_forks: u64,
    pub max_forks: u64,
}
