//! Request, upstream, and response data types

pub mod github;
pub mod ranked;
pub mod request;

pub use github::{RepositoryItem, SearchBounds, SearchResponse, SortField, SortOrder};
pub use ranked::RankedRepository;
pub use request::SearchRequest;
