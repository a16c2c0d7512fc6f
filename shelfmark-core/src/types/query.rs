//! Book queries - unresolved title/author pairs awaiting a catalog match

use serde::{Deserialize, Serialize};
use std::fmt;

/// A title/author pair submitted for matching
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookQuery {
    /// Book title as typed or detected
    pub title: String,

    /// Author name, if known
    #[serde(default)]
    pub author: Option<String>,
}

impl BookQuery {
    /// Create a query with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Whether this query may enter a reconciliation queue.
    /// Titles made only of whitespace count as empty.
    pub fn is_admissible(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Author with surrounding whitespace removed, `None` when blank
    pub fn author_filter(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

impl fmt::Display for BookQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.author_filter() {
            Some(author) => write!(f, "{} by {}", self.title, author),
            None => write!(f, "{}", self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admissible() {
        assert!(BookQuery::new("Principles").is_admissible());
        assert!(!BookQuery::new("").is_admissible());
        assert!(!BookQuery::new("   ").is_admissible());
    }

    #[test]
    fn test_author_filter() {
        assert_eq!(BookQuery::new("X").author_filter(), None);
        assert_eq!(BookQuery::new("X").with_author(" ").author_filter(), None);
        assert_eq!(
            BookQuery::new("X").with_author(" Ray Dalio ").author_filter(),
            Some("Ray Dalio")
        );
    }

    #[test]
    fn test_display() {
        let query = BookQuery::new("Principles").with_author("Ray Dalio");
        assert_eq!(query.to_string(), "Principles by Ray Dalio");
        assert_eq!(BookQuery::new("Principles").to_string(), "Principles");
    }

    #[test]
    fn test_deserialize_without_author() {
        let query: BookQuery = serde_json::from_str(r#"{"title": "Principles"}"#).unwrap();
        assert_eq!(query, BookQuery::new("Principles"));

        let query: BookQuery =
            serde_json::from_str(r#"{"title": "Principles", "author": null}"#).unwrap();
        assert!(query.author.is_none());
    }
}
