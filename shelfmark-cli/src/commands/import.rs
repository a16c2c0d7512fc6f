//! Detector payload import command implementation

use super::match_books::auto_match;
use super::review::review_queries;
use super::{build_lookup, report_outcome};
use crate::LookupArgs;
use anyhow::{Context, Result};
use shelfmark_core::detection::parse_detection_payload;
use std::io;

/// Queue the books found by a shelf-photo detector and match them
pub async fn import_detected(
    args: &LookupArgs,
    payload_path: &str,
    interactive: bool,
    output: &str,
) -> Result<()> {
    let payload = std::fs::read_to_string(payload_path)
        .with_context(|| format!("Failed to open payload file: {}", payload_path))?;

    // A bad payload is reported but does not stop the run
    let queries = match parse_detection_payload(&payload) {
        Ok(queries) => queries,
        Err(e) => {
            eprintln!("Failed to parse detected books: {}", e);
            Vec::new()
        }
    };

    if queries.is_empty() {
        println!("No books detected");
        return Ok(());
    }

    println!("Detected {} books", queries.len());
    let lookup = build_lookup(args)?;

    if interactive {
        let stdin = io::stdin();
        let report = review_queries(queries, &lookup, &mut stdin.lock(), &mut io::stdout()).await?;
        report_outcome(&report, output)
    } else {
        println!("Processing books...");
        auto_match(queries, &lookup, output).await
    }
}
