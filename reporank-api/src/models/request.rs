//! Validated search request

use chrono::NaiveDate;
use reporank_common::{Error, Result};

/// Validation messages surfaced to API callers
pub const MSG_KEYWORDS_LENGTH: &str = "Search keywords must be 1 to 50 characters long";
pub const MSG_EARLIEST_DATE_PAST: &str = "Earliest created date must be in the past";
pub const MSG_LANGUAGE_PATTERN: &str =
    "Programming language must be a single string without spaces or commas";
pub const MSG_MAX_PAGES: &str = "Max pages to be searched must be less than or equal to 10";

/// Hard ceiling on requested pages
pub const MAX_PAGES_LIMIT: u32 = 10;

/// A validated, immutable search request.
///
/// Construction is only possible through [`SearchRequest::new`], so every
/// instance downstream of the API boundary is known to be well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keywords: String,
    language: Option<String>,
    earliest_created_date: Option<NaiveDate>,
    max_pages: Option<u32>,
}

impl SearchRequest {
    /// Validate raw inputs into a request. `today` is the reference date for
    /// the "must be in the past" rule so callers control the clock.
    pub fn new(
        keywords: String,
        language: Option<String>,
        earliest_created_date: Option<NaiveDate>,
        max_pages: Option<u32>,
        today: NaiveDate,
    ) -> Result<Self> {
        let keywords = keywords.trim().to_string();
        if keywords.is_empty() || keywords.chars().count() > 50 {
            return Err(Error::InvalidInput(MSG_KEYWORDS_LENGTH.to_string()));
        }

        if let Some(language) = &language {
            if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(Error::InvalidInput(MSG_LANGUAGE_PATTERN.to_string()));
            }
        }

        if let Some(date) = earliest_created_date {
            if date >= today {
                return Err(Error::InvalidInput(MSG_EARLIEST_DATE_PAST.to_string()));
            }
        }

        if let Some(pages) = max_pages {
            if pages == 0 || pages > MAX_PAGES_LIMIT {
                return Err(Error::InvalidInput(MSG_MAX_PAGES.to_string()));
            }
        }

        Ok(Self {
            keywords,
            language,
            earliest_created_date,
            max_pages,
        })
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn earliest_created_date(&self) -> Option<NaiveDate> {
        self.earliest_created_date
    }

    /// Requested page count; `None` means "use the service default".
    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }
}
