//! The canonical book record - the export-ready form of a confirmed match

use serde::{Deserialize, Serialize};

/// Placeholder ISBN for records that carry neither an ISBN-13 nor an ISBN-10
pub const ISBN_NOT_AVAILABLE: &str = "N/A";

/// A normalized book, derived from exactly one candidate record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalBook {
    /// Book title
    pub title: String,

    /// All authors joined with `", "`
    pub author: String,

    /// Publication date as given by the service (`2017`, `2017-09`, `2017-09-19`)
    pub publish_date: String,

    /// Preferred ISBN, or [`ISBN_NOT_AVAILABLE`]
    pub isbn: String,

    /// Publisher name
    pub publisher: String,

    /// Page count in decimal, empty when unknown
    pub number_of_pages: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_serialization() {
        let book = CanonicalBook {
            title: "Principles".to_string(),
            author: "Ray Dalio".to_string(),
            publish_date: "2017-09-19".to_string(),
            isbn: "9781501124020".to_string(),
            publisher: "Simon and Schuster".to_string(),
            number_of_pages: "592".to_string(),
        };
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains(r#""number_of_pages":"592""#));
        let deserialized: CanonicalBook = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
        assert_ne!(book.isbn, ISBN_NOT_AVAILABLE);
    }
}
