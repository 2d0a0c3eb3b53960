//! Common error types for reporank

use thiserror::Error;

/// Common result type for reporank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service-wide error taxonomy.
///
/// The upstream variants carry fixed, generic display messages. Upstream
/// response bodies are logged at the call site and never travel inside an
/// error value, so nothing from GitHub can leak to an API caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("{0}")]
    InvalidInput(String),

    /// Upstream rejected the query as unprocessable (status 422).
    /// Handled locally as an empty page; never escapes the orchestrator.
    #[error("Search query not processable")]
    UpstreamUnprocessable,

    /// Upstream answered with a non-retryable 4xx
    #[error("Invalid search request")]
    UpstreamClient,

    /// Upstream answered with 5xx and the retry budget is exhausted
    #[error("Search service temporarily unavailable")]
    UpstreamServer,

    /// Network failure or timeout reaching upstream
    #[error("Cannot connect to search service")]
    UpstreamConnection,

    /// Catch-all for unclassified failures
    #[error("Search operation failed")]
    Internal,
}
