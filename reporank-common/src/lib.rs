//! Shared types for the reporank services
//!
//! Error taxonomy, configuration loading, and recency-label formatting used
//! by the API service crate.

pub mod config;
pub mod error;
pub mod recency;

pub use error::{Error, Result};
