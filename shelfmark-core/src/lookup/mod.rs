//! Bibliographic metadata lookup
//!
//! A [`MetadataLookup`] turns a [`BookQuery`] into at most
//! [`MAX_CANDIDATES`] candidate records, in the service's own relevance order.

mod google_books;
mod memory;

pub use google_books::GoogleBooksClient;
pub use memory::StaticLookup;

use crate::config::MAX_CANDIDATES;
use crate::error::LookupError;
use crate::types::{BookQuery, CandidateRecord};
use async_trait::async_trait;

/// A source of candidate records for a title/author pair
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Search for candidates. Implementations should return them in
    /// relevance order; callers truncate to [`MAX_CANDIDATES`].
    async fn search(&self, query: &BookQuery) -> Result<Vec<CandidateRecord>, LookupError>;
}

/// Search and cap the result at [`MAX_CANDIDATES`], keeping service order
pub async fn fetch_candidates(
    lookup: &dyn MetadataLookup,
    query: &BookQuery,
) -> Result<Vec<CandidateRecord>, LookupError> {
    let mut candidates = lookup.search(query).await?;
    candidates.truncate(MAX_CANDIDATES);
    Ok(candidates)
}

/// Search, treating any failure as "no results"
pub async fn search_or_empty(
    lookup: &dyn MetadataLookup,
    query: &BookQuery,
) -> Vec<CandidateRecord> {
    match fetch_candidates(lookup, query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("Lookup failed for '{}': {}", query, e);
            Vec::new()
        }
    }
}

/// Build the service's free-text query: a required title filter and an
/// optional author filter. Space-separated terms are ANDed by the service.
pub fn search_expression(query: &BookQuery) -> String {
    let mut expression = format!("intitle:{}", query.title.trim());
    if let Some(author) = query.author_filter() {
        expression.push_str(" inauthor:");
        expression.push_str(author);
    }
    expression
}
