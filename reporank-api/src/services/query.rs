//! Upstream query string construction

use crate::models::SearchRequest;

/// Build the upstream search query from a validated request.
///
/// Clauses are concatenated in fixed order: keywords, language filter,
/// created-on-or-after filter. `+` is the upstream clause separator; no other
/// escaping is applied.
pub fn build_query(request: &SearchRequest) -> String {
    let mut query = String::from(request.keywords());

    if let Some(language) = request.language() {
        query.push_str("+language:");
        query.push_str(language);
    }

    if let Some(date) = request.earliest_created_date() {
        query.push_str("+created:>=");
        query.push_str(&date.format("%Y-%m-%d").to_string());
    }

    query
}
