//! In-memory lookup (for testing and offline use)

use super::MetadataLookup;
use crate::error::LookupError;
use crate::types::{BookQuery, CandidateRecord};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup backed by a fixed title -> records table.
/// Titles are matched case-insensitively; the author is ignored.
#[derive(Default)]
pub struct StaticLookup {
    records: HashMap<String, Vec<CandidateRecord>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

fn key(title: &str) -> String {
    title.trim().to_lowercase()
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer searches for `title` with `records`
    pub fn with_records(mut self, title: &str, records: Vec<CandidateRecord>) -> Self {
        self.records.insert(key(title), records);
        self
    }

    /// Fail searches for `title` with a transport error
    pub fn with_failure(mut self, title: &str) -> Self {
        self.failing.insert(key(title));
        self
    }

    /// Number of searches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MetadataLookup for StaticLookup {
    async fn search(&self, query: &BookQuery) -> Result<Vec<CandidateRecord>, LookupError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let key = key(&query.title);
        if self.failing.contains(&key) {
            return Err(LookupError::Transport(format!(
                "simulated failure for '{}'",
                query.title
            )));
        }

        Ok(self.records.get(&key).cloned().unwrap_or_default())
    }
}
