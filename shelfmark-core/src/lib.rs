//! Shelfmark Core Library
//!
//! This crate turns informally captured book references (typed or detected
//! title/author pairs) into canonical catalog records. Queries are matched
//! against a bibliographic search service, reconciled in a per-session queue,
//! and exported in the LibraryThing import format.

pub mod config;
pub mod detection;
pub mod error;
pub mod export;
pub mod lookup;
pub mod normalize;
pub mod policy;
pub mod queue;
pub mod session;
pub mod types;

pub use config::{LookupConfig, MAX_CANDIDATES};
pub use error::{DetectionError, ExportError, LookupError, SelectionError};
pub use lookup::{GoogleBooksClient, MetadataLookup, StaticLookup};
pub use normalize::normalize;
pub use policy::{AutoTopMatch, InteractiveSelect, PolicyKind, SelectionPolicy};
pub use queue::{ReconciliationEntry, ReconciliationQueue};
pub use session::{run_batch, FinalizeReport, Session};
pub use types::{BookQuery, CandidateRecord, CanonicalBook, EntryId, Selection};
