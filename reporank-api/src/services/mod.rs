//! Search orchestration and scoring services

pub mod github_client;
pub mod query;
pub mod retry;
pub mod scoring;
pub mod search;

pub use github_client::{GithubClient, SearchUpstream, UpstreamError};
pub use retry::RetryPolicy;
pub use search::SearchService;
