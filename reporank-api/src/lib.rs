//! reporank-api library interface
//!
//! Exposes the router, application state, and the search/scoring services
//! for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use services::SearchService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Search orchestration service; owns the worker limit and retry policy
    pub search: Arc<SearchService>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(search: Arc<SearchService>) -> Self {
        Self {
            search,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::search_routes())
        .merge(api::health_routes())
        .with_state(state)
}
