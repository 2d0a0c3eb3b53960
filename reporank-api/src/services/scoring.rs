//! Popularity scoring and ranking
//!
//! Two-stage min-max normalization: stars and forks are each mapped into
//! [0, 10] against the population bounds and combined with fixed weights,
//! then the raw scores are re-normalized across the result set so the final
//! distribution spans the full range whenever there is any variance.

use chrono::NaiveDate;
use reporank_common::recency::recency_label;
use std::cmp::Ordering;

use crate::models::{RankedRepository, RepositoryItem, SearchBounds};

const STARS_WEIGHT: f64 = 0.5;
const FORKS_WEIGHT: f64 = 1.0;
const SCORE_RANGE_MIN: f64 = 0.0;
const SCORE_RANGE_MAX: f64 = 10.0;

/// Score every item against the bounds and return the list ranked by final
/// score descending. Ties keep their input order (stable sort). `today` is
/// the reference date for recency labels.
pub fn score_and_rank(
    items: &[RepositoryItem],
    bounds: SearchBounds,
    today: NaiveDate,
) -> Vec<RankedRepository> {
    if items.is_empty() {
        return Vec::new();
    }

    let raw_scores: Vec<f64> = items.iter().map(|item| raw_score(item, bounds)).collect();

    let min_raw = raw_scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max_raw = raw_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut scored: Vec<(&RepositoryItem, f64)> = items
        .iter()
        .zip(raw_scores)
        .map(|(item, raw)| (item, normalize_to_range(raw, min_raw, max_raw)))
        .collect();

    // Stable sort: equal scores retain insertion order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .map(|(item, score)| to_ranked(item, score, today))
        .collect()
}

/// Weighted combination of the per-dimension normalized counts.
fn raw_score(item: &RepositoryItem, bounds: SearchBounds) -> f64 {
    let normalized_stars = normalize_to_range(
        item.stargazers_count as f64,
        bounds.min_stars as f64,
        bounds.max_stars as f64,
    );
    let normalized_forks = normalize_to_range(
        item.forks_count as f64,
        bounds.min_forks as f64,
        bounds.max_forks as f64,
    );

    normalized_stars * STARS_WEIGHT + normalized_forks * FORKS_WEIGHT
}

/// Linear min-max normalization into [0, 10], clamped. A population with no
/// spread maps to the top of the range so equal values never collapse the
/// scores to zero.
pub fn normalize_to_range(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return SCORE_RANGE_MAX;
    }

    let normalized = (value - min) / (max - min) * (SCORE_RANGE_MAX - SCORE_RANGE_MIN) + SCORE_RANGE_MIN;
    normalized.clamp(SCORE_RANGE_MIN, SCORE_RANGE_MAX)
}

/// One decimal place; the decimal point is dropped for whole values.
pub fn format_score(score: f64) -> String {
    let rounded = (score * 10.0).round() / 10.0;
    if rounded == rounded.floor() {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

fn to_ranked(item: &RepositoryItem, score: f64, today: NaiveDate) -> RankedRepository {
    let created = item.created_at.map(|dt| dt.date_naive());

    RankedRepository {
        name: item.name.clone(),
        url: item.html_url.clone(),
        language: item.language.clone(),
        created,
        stars: item.stargazers_count,
        forks: item.forks_count,
        recency: recency_label(created, today),
        popularity_score: format_score(score),
    }
}
