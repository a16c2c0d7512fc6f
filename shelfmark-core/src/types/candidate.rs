//! Raw candidate records as returned by the bibliographic search service

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a list leniently: `null` reads as empty and entries that do
/// not fit `T` are dropped instead of failing the whole document.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    let values = values.unwrap_or_default();
    let total = values.len();

    let kept: Vec<T> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if kept.len() < total {
        tracing::debug!("Dropped {} malformed list entries", total - kept.len());
    }
    Ok(kept)
}

/// One search hit from the volumes endpoint.
/// Every field is optional on the wire; missing values deserialize to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
    /// Service-side volume id
    pub id: Option<String>,

    /// Bibliographic details
    pub volume_info: VolumeInfo,
}

/// The `volumeInfo` block of a search hit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u64>,
    #[serde(deserialize_with = "lenient_list")]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

/// A typed identifier such as an ISBN
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndustryIdentifier {
    /// Identifier scheme (`ISBN_13`, `ISBN_10`, `ISSN`, `OTHER`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Identifier value
    pub identifier: String,
}

impl IndustryIdentifier {
    pub fn new(kind: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            identifier: identifier.into(),
        }
    }
}

impl CandidateRecord {
    /// Human-readable `"<title> by <authors>"` label for presenting a choice.
    /// Two editions can share a label, so this never identifies a candidate.
    pub fn display_label(&self) -> String {
        format!(
            "{} by {}",
            self.volume_info.title.as_deref().unwrap_or_default(),
            self.volume_info.authors.join(", ")
        )
    }
}

/// Envelope of a volumes search response. An item the service mangled is
/// skipped; the rest of the page is kept.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct VolumesResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<CandidateRecord>,
}
