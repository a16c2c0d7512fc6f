//! Book detector contract
//!
//! A detector looks at a photo of a shelf and answers with a JSON payload of
//! the form `{"books": [{"title": "...", "author": "..."}]}`. Detection itself
//! lives outside this crate; this module defines the seam and parses the payload.

use crate::error::DetectionError;
use crate::types::BookQuery;
use async_trait::async_trait;
use serde::Deserialize;

/// Something that can turn an image into a detector payload
#[async_trait]
pub trait BookDetector: Send + Sync {
    /// Analyze an image and return the raw JSON payload
    async fn detect(&self, image: &[u8]) -> Result<String, DetectionError>;
}

#[derive(Debug, Deserialize)]
struct DetectionPayload {
    books: Vec<DetectedBook>,
}

#[derive(Debug, Deserialize)]
struct DetectedBook {
    title: String,
    #[serde(default)]
    author: Option<String>,
}

/// Parse a detector payload into book queries.
///
/// Text that is not JSON at all is a [`DetectionError::MalformedJson`]; JSON
/// without a `books` array of `{title, author}` objects is a
/// [`DetectionError::SchemaMismatch`]. Entries are returned as detected,
/// including ones with empty titles, which the queue will not admit.
pub fn parse_detection_payload(payload: &str) -> Result<Vec<BookQuery>, DetectionError> {
    let value: serde_json::Value = serde_json::from_str(payload.trim())
        .map_err(|e| DetectionError::MalformedJson(e.to_string()))?;

    let parsed: DetectionPayload = serde_json::from_value(value)
        .map_err(|e| DetectionError::SchemaMismatch(e.to_string()))?;

    Ok(parsed
        .books
        .into_iter()
        .map(|b| BookQuery {
            title: b.title,
            author: b.author,
        })
        .collect())
}

/// Run a detector over an image and parse its answer
pub async fn detect_queries(
    detector: &dyn BookDetector,
    image: &[u8],
) -> Result<Vec<BookQuery>, DetectionError> {
    let payload = detector.detect(image).await?;
    let queries = parse_detection_payload(&payload)?;
    tracing::info!(
        "Detected {} books, first: {}",
        queries.len(),
        queries.first().map(|q| q.title.as_str()).unwrap_or("None")
    );
    Ok(queries)
}
