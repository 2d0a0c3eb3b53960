//! Search orchestration integration tests
//!
//! Drives SearchService against a scripted upstream: probe defaulting,
//! partial-failure merging, retry exhaustion, and error classification.

mod helpers;

use chrono::NaiveDate;
use helpers::*;
use reporank_api::models::{SearchRequest, SortField, SortOrder};
use reporank_api::services::{SearchService, UpstreamError};
use reporank_common::Error;
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
}

fn request(max_pages: Option<u32>) -> SearchRequest {
    SearchRequest::new("rust web framework".to_string(), None, None, max_pages, today()).unwrap()
}

fn service(mock: &Arc<MockUpstream>) -> SearchService {
    SearchService::new(Arc::clone(mock) as Arc<dyn reporank_api::services::SearchUpstream>, test_settings())
}

#[tokio::test]
async fn merged_pages_are_scored_and_ranked() {
    let mock = Arc::new(MockUpstream::new());

    // Probes: min stars 2, min forks 1, max stars 500
    mock.script(1, SortField::Stars, SortOrder::Asc, Ok(response_with(vec![repo(10, 2, 7)])));
    mock.script(1, SortField::Forks, SortOrder::Asc, Ok(response_with(vec![repo(11, 9, 1)])));
    mock.script(1, SortField::Stars, SortOrder::Desc, Ok(response_with(vec![repo(12, 500, 3)])));

    // Two result pages; max forks (200) comes from the merged set
    mock.script(
        1,
        SortField::Forks,
        SortOrder::Desc,
        Ok(response_with(vec![repo(1, 500, 200), repo(2, 100, 50)])),
    );
    mock.script(2, SortField::Forks, SortOrder::Desc, Ok(response_with(vec![repo(3, 2, 1)])));

    let ranked = service(&mock).search(&request(Some(2)), today()).await.unwrap();

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].name, "repo-1");
    assert_eq!(ranked[0].popularity_score, "10");
    assert_eq!(ranked[1].name, "repo-2");
    assert_eq!(ranked[1].popularity_score, "2.3");
    assert_eq!(ranked[2].name, "repo-3");
    assert_eq!(ranked[2].popularity_score, "0");

    // Only the requested pages were fetched
    assert_eq!(mock.call_count(3, SortField::Forks, SortOrder::Desc), 0);
}

#[tokio::test]
async fn probe_failures_default_bounds_to_zero() {
    let mock = Arc::new(MockUpstream::new());

    // All three probes fail; the request must still succeed
    mock.script(1, SortField::Stars, SortOrder::Asc, Err(UpstreamError::Server { status: 500 }));
    mock.script(1, SortField::Forks, SortOrder::Asc, Err(UpstreamError::Connection("refused".into())));
    mock.script(1, SortField::Stars, SortOrder::Desc, Err(UpstreamError::Client { status: 403 }));

    mock.script(
        1,
        SortField::Forks,
        SortOrder::Desc,
        Ok(response_with(vec![repo(1, 50, 10), repo(2, 0, 0)])),
    );

    let ranked = service(&mock).search(&request(Some(1)), today()).await.unwrap();

    // Star bounds collapsed to 0..0, so stars contribute 10 to everyone;
    // forks (bounded 0..10 from the page set) decide the ranking.
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "repo-1");
    assert_eq!(ranked[0].popularity_score, "10");
    assert_eq!(ranked[1].popularity_score, "0");

    // Probes are advisory: one attempt each, no retries
    assert_eq!(mock.call_count(1, SortField::Stars, SortOrder::Asc), 1);
    assert_eq!(mock.call_count(1, SortField::Forks, SortOrder::Asc), 1);
    assert_eq!(mock.call_count(1, SortField::Stars, SortOrder::Desc), 1);
}

#[tokio::test]
async fn unprocessable_pages_merge_partial_results() {
    let mock = Arc::new(MockUpstream::new());

    mock.script(1, SortField::Forks, SortOrder::Desc, Ok(response_with(vec![repo(1, 30, 9)])));
    mock.script(2, SortField::Forks, SortOrder::Desc, Err(UpstreamError::Unprocessable));
    mock.script(3, SortField::Forks, SortOrder::Desc, Ok(response_with(vec![repo(3, 20, 6)])));
    mock.script(4, SortField::Forks, SortOrder::Desc, Err(UpstreamError::Unprocessable));
    mock.script(5, SortField::Forks, SortOrder::Desc, Ok(response_with(vec![repo(5, 10, 3)])));

    let ranked = service(&mock).search(&request(Some(5)), today()).await.unwrap();

    assert_eq!(ranked.len(), 3);
    // Unprocessable is terminal: no retry burned on those pages
    assert_eq!(mock.call_count(2, SortField::Forks, SortOrder::Desc), 1);
    assert_eq!(mock.call_count(4, SortField::Forks, SortOrder::Desc), 1);
}

#[tokio::test]
async fn server_errors_retry_then_fail_the_request() {
    let mock = Arc::new(MockUpstream::new());

    for _ in 0..3 {
        mock.script(1, SortField::Forks, SortOrder::Desc, Err(UpstreamError::Server { status: 502 }));
    }

    let result = service(&mock).search(&request(Some(1)), today()).await;

    assert!(matches!(result, Err(Error::UpstreamServer)));
    assert_eq!(mock.call_count(1, SortField::Forks, SortOrder::Desc), 3);
}

#[tokio::test]
async fn transient_failure_recovers_within_the_retry_budget() {
    let mock = Arc::new(MockUpstream::new());

    mock.script(1, SortField::Forks, SortOrder::Desc, Err(UpstreamError::Server { status: 503 }));
    mock.script(1, SortField::Forks, SortOrder::Desc, Ok(response_with(vec![repo(1, 5, 5)])));

    let ranked = service(&mock).search(&request(Some(1)), today()).await.unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(mock.call_count(1, SortField::Forks, SortOrder::Desc), 2);
}

#[tokio::test]
async fn client_errors_fail_fast_without_retry() {
    let mock = Arc::new(MockUpstream::new());

    mock.script(1, SortField::Forks, SortOrder::Desc, Err(UpstreamError::Client { status: 403 }));

    let result = service(&mock).search(&request(Some(1)), today()).await;

    assert!(matches!(result, Err(Error::UpstreamClient)));
    assert_eq!(mock.call_count(1, SortField::Forks, SortOrder::Desc), 1);
}

#[tokio::test]
async fn connection_errors_keep_their_own_classification() {
    let mock = Arc::new(MockUpstream::new());

    for _ in 0..3 {
        mock.script(
            1,
            SortField::Forks,
            SortOrder::Desc,
            Err(UpstreamError::Connection("connect timeout".into())),
        );
    }

    let result = service(&mock).search(&request(Some(1)), today()).await;

    assert!(matches!(result, Err(Error::UpstreamConnection)));
    assert_eq!(mock.call_count(1, SortField::Forks, SortOrder::Desc), 3);
}

#[tokio::test]
async fn zero_item_pages_yield_an_empty_result_without_error() {
    let mock = Arc::new(MockUpstream::new());
    // Everything unscripted: probes and pages all answer empty success

    let ranked = service(&mock).search(&request(None), today()).await.unwrap();

    assert!(ranked.is_empty());
    // Default page count was used
    assert_eq!(mock.call_count(5, SortField::Forks, SortOrder::Desc), 1);
    assert_eq!(mock.call_count(6, SortField::Forks, SortOrder::Desc), 0);
}
