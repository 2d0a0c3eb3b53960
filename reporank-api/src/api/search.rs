//! Repository search endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::models::{RankedRepository, SearchRequest};
use crate::AppState;

/// Raw query parameters before validation
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keywords: Option<String>,
    pub language: Option<String>,
    pub earliest_created_date: Option<NaiveDate>,
    pub max_pages: Option<u32>,
}

/// GET /api/search
///
/// Validates the raw parameters into a [`SearchRequest`] and returns the
/// ranked repository list.
pub async fn search_repositories(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<RankedRepository>>> {
    let today = Utc::now().date_naive();

    let request = SearchRequest::new(
        params.keywords.unwrap_or_default(),
        params.language,
        params.earliest_created_date,
        params.max_pages,
        today,
    )?;

    let results = state.search.search(&request, today).await?;
    Ok(Json(results))
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_repositories))
}
