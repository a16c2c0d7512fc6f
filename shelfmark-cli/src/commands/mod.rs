//! CLI command implementations

mod import;
mod match_books;
mod review;

pub use import::import_detected;
pub use match_books::match_books;
pub use review::review;

use crate::LookupArgs;
use anyhow::{Context, Result};
use shelfmark_core::export::export_to_file;
use shelfmark_core::{BookQuery, FinalizeReport, GoogleBooksClient, LookupConfig};
use std::path::Path;

/// Books used when no input file is given
pub fn sample_books() -> Vec<BookQuery> {
    vec![
        BookQuery::new("Principles").with_author("Ray Dalio"),
        BookQuery::new("In the Realm of Hungry Ghosts").with_author("Gabor Mate"),
        BookQuery::new("The Organized Mind").with_author("Daniel J. Levitin"),
    ]
}

/// Read a JSON array of queries, or fall back to the sample books
pub fn load_queries(input: Option<&str>) -> Result<Vec<BookQuery>> {
    let Some(input) = input else {
        return Ok(sample_books());
    };

    let data = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to open input file: {}", input))?;
    let queries: Vec<BookQuery> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse book list in {}", input))?;

    tracing::debug!("Loaded {} books from {}", queries.len(), input);
    Ok(queries)
}

/// Build the HTTP lookup client from command-line settings
pub fn build_lookup(args: &LookupArgs) -> Result<GoogleBooksClient> {
    let config = LookupConfig::new()
        .with_base_url(args.api_url.clone())
        .with_timeout(args.timeout())
        .with_api_key(args.api_key.clone());

    GoogleBooksClient::new(config).context("Failed to create lookup client")
}

/// Write the export if anything matched and list what did not
pub fn report_outcome(report: &FinalizeReport, output: &str) -> Result<()> {
    if !report.matched.is_empty() {
        export_to_file(&report.matched, Path::new(output))
            .with_context(|| format!("Failed to write {}", output))?;
        println!("\nExported {} books to {}", report.matched.len(), output);
    }

    if !report.unmatched.is_empty() {
        println!("\nUnfound books:");
        for query in &report.unmatched {
            println!("- {}", query);
        }
    }

    Ok(())
}
