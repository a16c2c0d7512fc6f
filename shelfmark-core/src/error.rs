//! Error types for Shelfmark Core

use crate::types::EntryId;
use thiserror::Error;

/// Errors from the bibliographic search service.
///
/// The reconciliation queue recovers every variant as "no candidates",
/// so these only surface to callers that use a lookup directly.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Lookup timed out")]
    Timeout,

    #[error("Service returned status {0}")]
    Status(u16),

    #[error("Malformed service response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_decode() {
            LookupError::Parse(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

/// Errors in a book detector payload
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Detector returned invalid JSON: {0}")]
    MalformedJson(String),

    #[error("Detector payload has unexpected shape: {0}")]
    SchemaMismatch(String),
}

/// Errors when recording a candidate selection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No pending entry with id {0}")]
    UnknownEntry(EntryId),

    #[error("Candidate index {index} out of range for entry {entry} ({available} available)")]
    IndexOutOfRange {
        entry: EntryId,
        index: usize,
        available: usize,
    },
}

/// Errors while writing the catalog-import file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
