//! Reconciliation queue
//!
//! Pending title/author submissions, their lazily fetched candidates and the
//! current selection. [`ReconciliationQueue::finalize_all`] turns every
//! pending entry into either a matched [`CanonicalBook`] or an unmatched
//! [`BookQuery`] and empties the queue.

use crate::error::SelectionError;
use crate::lookup::{fetch_candidates, MetadataLookup};
use crate::normalize::normalize;
use crate::policy::SelectionPolicy;
use crate::types::{BookQuery, CandidateRecord, CanonicalBook, EntryId, Selection};

/// A submitted query awaiting reconciliation
#[derive(Debug, Clone)]
pub struct ReconciliationEntry {
    id: EntryId,
    query: BookQuery,
    /// `None` until a lookup has succeeded
    candidates: Option<Vec<CandidateRecord>>,
    selection: Selection,
}

impl ReconciliationEntry {
    fn new(query: BookQuery) -> Self {
        Self {
            id: EntryId::new(),
            query,
            candidates: None,
            selection: Selection::Unselected,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn query(&self) -> &BookQuery {
        &self.query
    }

    /// Cached candidates, `None` if they have not been fetched yet
    pub fn candidates(&self) -> Option<&[CandidateRecord]> {
        self.candidates.as_deref()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    fn available(&self) -> usize {
        self.candidates.as_ref().map_or(0, Vec::len)
    }

    fn resolve(&self) -> Result<CanonicalBook, BookQuery> {
        let Selection::Selected(index) = self.selection else {
            return Err(self.query.clone());
        };

        match self.candidates().and_then(|c| c.get(index)) {
            Some(candidate) => Ok(normalize(candidate)),
            None => {
                tracing::warn!(
                    "Selection {} no longer valid for '{}', treating as unmatched",
                    index,
                    self.query
                );
                Err(self.query.clone())
            }
        }
    }
}

/// Session-scoped queue of pending entries, kept in submission order
#[derive(Debug, Default)]
pub struct ReconciliationQueue {
    pending: Vec<ReconciliationEntry>,
}

impl ReconciliationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending entry. Queries with an empty title are not admitted.
    pub fn enqueue(&mut self, query: BookQuery) -> Option<EntryId> {
        if !query.is_admissible() {
            tracing::debug!("Skipping query with empty title");
            return None;
        }

        let entry = ReconciliationEntry::new(query);
        let id = entry.id;
        self.pending.push(entry);
        Some(id)
    }

    /// Enqueue several queries, returning how many were admitted
    pub fn extend<I>(&mut self, queries: I) -> usize
    where
        I: IntoIterator<Item = BookQuery>,
    {
        queries
            .into_iter()
            .filter_map(|q| self.enqueue(q))
            .count()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending entries in submission order
    pub fn entries(&self) -> &[ReconciliationEntry] {
        &self.pending
    }

    /// Ids of pending entries in submission order
    pub fn ids(&self) -> Vec<EntryId> {
        self.pending.iter().map(|e| e.id).collect()
    }

    pub fn get(&self, id: EntryId) -> Option<&ReconciliationEntry> {
        self.pending.iter().find(|e| e.id == id)
    }

    fn entry_mut(&mut self, id: EntryId) -> Result<&mut ReconciliationEntry, SelectionError> {
        self.pending
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(SelectionError::UnknownEntry(id))
    }

    /// Candidates for an entry, fetched on first access and cached afterwards.
    ///
    /// A failed lookup is logged and reported as no candidates; nothing is
    /// cached, so the next access retries.
    pub async fn candidates(
        &mut self,
        id: EntryId,
        lookup: &dyn MetadataLookup,
    ) -> Result<&[CandidateRecord], SelectionError> {
        let entry = self.entry_mut(id)?;

        if entry.candidates.is_none() {
            match fetch_candidates(lookup, &entry.query).await {
                Ok(found) => {
                    tracing::debug!("'{}': {} candidates", entry.query, found.len());
                    entry.candidates = Some(found);
                }
                Err(e) => {
                    tracing::warn!("Lookup failed for '{}': {}", entry.query, e);
                    return Ok(&[]);
                }
            }
        }

        Ok(entry.candidates.as_deref().unwrap_or_default())
    }

    /// Fetch candidates for every entry that has none cached.
    /// Returns the number of entries still without candidates afterwards.
    pub async fn prefetch_all(&mut self, lookup: &dyn MetadataLookup) -> usize {
        for id in self.ids() {
            // Only UnknownEntry can fail here and every id came from the queue
            let _ = self.candidates(id, lookup).await;
        }
        self.pending.iter().filter(|e| e.candidates.is_none()).count()
    }

    /// Record (or overwrite) the chosen candidate for an entry
    pub fn select(&mut self, id: EntryId, index: usize) -> Result<(), SelectionError> {
        let entry = self.entry_mut(id)?;
        let available = entry.available();
        if index >= available {
            return Err(SelectionError::IndexOutOfRange {
                entry: id,
                index,
                available,
            });
        }

        entry.selection = Selection::Selected(index);
        Ok(())
    }

    /// Return an entry to the unselected state
    pub fn clear_selection(&mut self, id: EntryId) -> Result<(), SelectionError> {
        self.entry_mut(id)?.selection = Selection::Unselected;
        Ok(())
    }

    /// Let a policy decide the selection of every pending entry
    pub fn apply_policy(&mut self, policy: &dyn SelectionPolicy) {
        for entry in &mut self.pending {
            entry.selection = policy.choose(entry);
        }
    }

    /// Finalize every pending entry in submission order and clear the queue.
    ///
    /// Outcomes are computed before the queue is touched, so each entry lands
    /// in exactly one of the two returned lists.
    pub fn finalize_all(&mut self) -> (Vec<CanonicalBook>, Vec<BookQuery>) {
        let outcomes: Vec<_> = std::mem::take(&mut self.pending)
            .iter()
            .map(ReconciliationEntry::resolve)
            .collect();

        let mut matched = Vec::new();
        let mut unmatched = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(book) => matched.push(book),
                Err(query) => unmatched.push(query),
            }
        }

        tracing::info!(
            "Finalized {} entries: {} matched, {} unmatched",
            matched.len() + unmatched.len(),
            matched.len(),
            unmatched.len()
        );

        (matched, unmatched)
    }
}
