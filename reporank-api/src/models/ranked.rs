//! Ranked output record

use chrono::NaiveDate;
use serde::Serialize;

/// One repository in the final ranked response.
///
/// Derived once from a [`RepositoryItem`](super::RepositoryItem) plus its
/// score and recency label; never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRepository {
    pub name: String,
    pub url: String,
    pub language: Option<String>,
    pub created: Option<NaiveDate>,
    pub stars: u64,
    pub forks: u64,
    pub recency: String,
    /// Popularity score in [0, 10], one decimal place, the decimal point
    /// dropped for whole values ("8", not "8.0")
    pub popularity_score: String,
}
