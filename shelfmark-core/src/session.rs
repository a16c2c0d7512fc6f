//! A user session: one reconciliation queue plus its finalized results

use crate::error::ExportError;
use crate::export;
use crate::lookup::MetadataLookup;
use crate::policy::SelectionPolicy;
use crate::queue::ReconciliationQueue;
use crate::types::{BookQuery, CanonicalBook, EntryId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one finalize batch
#[derive(Debug, Clone, Serialize)]
pub struct FinalizeReport {
    pub matched: Vec<CanonicalBook>,
    pub unmatched: Vec<BookQuery>,
    pub finalized_at: DateTime<Utc>,
}

impl FinalizeReport {
    /// Number of entries this batch finalized
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }
}

/// Everything one user works on: pending queries, the books confirmed so far
/// and the queries left unmatched by the latest finalize.
///
/// Sessions share nothing; a front-end serving several users keeps one each.
#[derive(Debug)]
pub struct Session {
    queue: ReconciliationQueue,
    processed: Vec<CanonicalBook>,
    unprocessed: Vec<BookQuery>,
    created_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            queue: ReconciliationQueue::new(),
            processed: Vec::new(),
            unprocessed: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn queue(&self) -> &ReconciliationQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut ReconciliationQueue {
        &mut self.queue
    }

    /// Books confirmed across all finalize batches, oldest first
    pub fn processed(&self) -> &[CanonicalBook] {
        &self.processed
    }

    /// Queries left unmatched by the most recent finalize
    pub fn unprocessed(&self) -> &[BookQuery] {
        &self.unprocessed
    }

    /// Submit a query; `None` if it was not admitted
    pub fn enqueue(&mut self, query: BookQuery) -> Option<EntryId> {
        self.queue.enqueue(query)
    }

    /// Finalize the queue with the selections as they stand
    pub fn finalize(&mut self) -> FinalizeReport {
        let (matched, unmatched) = self.queue.finalize_all();

        self.processed.extend(matched.iter().cloned());
        self.unprocessed = unmatched.clone();

        FinalizeReport {
            matched,
            unmatched,
            finalized_at: Utc::now(),
        }
    }

    /// Apply a policy to every pending entry, then finalize
    pub fn finalize_with(&mut self, policy: &dyn SelectionPolicy) -> FinalizeReport {
        self.queue.apply_policy(policy);
        self.finalize()
    }

    /// Forget the books confirmed so far
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    /// Catalog-import CSV of every processed book
    pub fn export_csv(&self) -> Result<String, ExportError> {
        export::export(&self.processed)
    }
}

/// Run a whole batch non-interactively: enqueue, look everything up, let the
/// policy choose and finalize.
pub async fn run_batch<I>(
    queries: I,
    lookup: &dyn MetadataLookup,
    policy: &dyn SelectionPolicy,
) -> FinalizeReport
where
    I: IntoIterator<Item = BookQuery>,
{
    let mut session = Session::new();
    session.queue_mut().extend(queries);
    session.queue_mut().prefetch_all(lookup).await;
    session.finalize_with(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::StaticLookup;
    use crate::policy::{AutoTopMatch, InteractiveSelect};
    use crate::types::{CandidateRecord, IndustryIdentifier, VolumeInfo};

    fn principles() -> CandidateRecord {
        CandidateRecord {
            id: Some("p1".to_string()),
            volume_info: VolumeInfo {
                title: Some("Principles".to_string()),
                authors: vec!["Ray Dalio".to_string()],
                publisher: Some("Simon and Schuster".to_string()),
                published_date: Some("2017-09-19".to_string()),
                page_count: Some(592),
                industry_identifiers: vec![IndustryIdentifier::new("ISBN_13", "9781501124020")],
            },
        }
    }

    fn lookup() -> StaticLookup {
        StaticLookup::new().with_records("Principles", vec![principles()])
    }

    #[tokio::test]
    async fn test_interactive_round_trip() {
        let lookup = lookup();
        let mut session = Session::new();
        let id = session
            .enqueue(BookQuery::new("Principles").with_author("Ray Dalio"))
            .unwrap();
        assert!(session.enqueue(BookQuery::new("")).is_none());

        session.queue_mut().candidates(id, &lookup).await.unwrap();
        session.queue_mut().select(id, 0).unwrap();
        let report = session.finalize_with(&InteractiveSelect);

        assert_eq!(report.total(), 1);
        assert_eq!(report.matched[0].title, "Principles");
        assert_eq!(session.processed().len(), 1);
        assert!(session.unprocessed().is_empty());
        assert!(session.queue().is_empty());

        let csv = session.export_csv().unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(r#""Simon and Schuster (2017-09-19), 592 pages""#));
    }

    #[tokio::test]
    async fn test_processed_accumulates_unprocessed_replaced() {
        let lookup = lookup();
        let mut session = Session::new();

        session.enqueue(BookQuery::new("Principles"));
        session.enqueue(BookQuery::new("Missing One"));
        session.queue_mut().prefetch_all(&lookup).await;
        session.finalize_with(&AutoTopMatch);
        assert_eq!(session.processed().len(), 1);
        assert_eq!(session.unprocessed(), &[BookQuery::new("Missing One")]);

        session.enqueue(BookQuery::new("Principles"));
        session.enqueue(BookQuery::new("Missing Two"));
        session.queue_mut().prefetch_all(&lookup).await;
        session.finalize_with(&AutoTopMatch);
        assert_eq!(session.processed().len(), 2);
        assert_eq!(session.unprocessed(), &[BookQuery::new("Missing Two")]);

        session.clear_processed();
        assert!(session.processed().is_empty());
    }

    #[tokio::test]
    async fn test_run_batch_auto_top_match() {
        let lookup = lookup();
        let report = run_batch(
            vec![
                BookQuery::new("Principles").with_author("Ray Dalio"),
                BookQuery::new("Nothing Like It"),
                BookQuery::new(""),
            ],
            &lookup,
            &AutoTopMatch,
        )
        .await;

        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].isbn, "9781501124020");
        assert_eq!(report.unmatched, vec![BookQuery::new("Nothing Like It")]);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let lookup = lookup();
        let mut first = Session::new();
        let mut second = Session::new();

        first.enqueue(BookQuery::new("Principles"));
        first.queue_mut().prefetch_all(&lookup).await;
        first.finalize_with(&AutoTopMatch);

        assert_eq!(first.processed().len(), 1);
        assert!(second.processed().is_empty());
        assert!(second.finalize().matched.is_empty());
    }
}
