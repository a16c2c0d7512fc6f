//! Mapping raw candidate records onto the canonical book schema

use crate::types::{CandidateRecord, CanonicalBook, IndustryIdentifier, ISBN_NOT_AVAILABLE};

const ISBN_13: &str = "ISBN_13";
const ISBN_10: &str = "ISBN_10";

/// Normalize a candidate record into a canonical book.
///
/// Total over any record: missing fields become empty strings and a missing
/// ISBN becomes [`ISBN_NOT_AVAILABLE`].
pub fn normalize(record: &CandidateRecord) -> CanonicalBook {
    let info = &record.volume_info;

    CanonicalBook {
        title: info.title.clone().unwrap_or_default(),
        author: info.authors.join(", "),
        publish_date: info.published_date.clone().unwrap_or_default(),
        isbn: preferred_isbn(&info.industry_identifiers)
            .unwrap_or(ISBN_NOT_AVAILABLE)
            .to_string(),
        publisher: info.publisher.clone().unwrap_or_default(),
        number_of_pages: info
            .page_count
            .map(|n| n.to_string())
            .unwrap_or_default(),
    }
}

/// First ISBN-13 in the list, else the first ISBN-10
pub fn preferred_isbn(identifiers: &[IndustryIdentifier]) -> Option<&str> {
    let first_of = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.identifier.as_str())
    };

    first_of(ISBN_13).or_else(|| first_of(ISBN_10))
}
