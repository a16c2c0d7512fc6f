//! Core data model: queries in, candidate records from the service, canonical books out

mod book;
mod candidate;
mod entry;
mod query;

pub use book::{CanonicalBook, ISBN_NOT_AVAILABLE};
pub(crate) use candidate::VolumesResponse;
pub use candidate::{CandidateRecord, IndustryIdentifier, VolumeInfo};
pub use entry::{EntryId, Selection};
pub use query::BookQuery;
