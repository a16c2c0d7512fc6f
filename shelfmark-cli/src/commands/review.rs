//! Interactive review command implementation

use super::{build_lookup, load_queries, report_outcome};
use crate::LookupArgs;
use anyhow::Result;
use shelfmark_core::{
    BookQuery, FinalizeReport, InteractiveSelect, MetadataLookup, SelectionError, Session,
};
use std::io::{self, BufRead, Write};

/// Present candidates for each book and let the user pick
pub async fn review(args: &LookupArgs, input: Option<&str>, output: &str) -> Result<()> {
    let queries = load_queries(input)?;
    let lookup = build_lookup(args)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut out = io::stdout();

    let report = review_queries(queries, &lookup, &mut reader, &mut out).await?;
    report_outcome(&report, output)
}

/// Walk the queue entry by entry, read a choice for each, then finalize
pub(super) async fn review_queries<R: BufRead, W: Write>(
    queries: Vec<BookQuery>,
    lookup: &dyn MetadataLookup,
    reader: &mut R,
    out: &mut W,
) -> Result<FinalizeReport> {
    let mut session = Session::new();
    session.queue_mut().extend(queries);

    for (n, id) in session.queue().ids().into_iter().enumerate() {
        let query = match session.queue().get(id) {
            Some(entry) => entry.query().clone(),
            None => continue,
        };
        writeln!(out, "\nBook {}: {}", n + 1, query)?;

        let labels: Vec<String> = session
            .queue_mut()
            .candidates(id, lookup)
            .await?
            .iter()
            .map(|c| c.display_label())
            .collect();

        if labels.is_empty() {
            writeln!(out, "  No matches found")?;
            continue;
        }

        for (i, label) in labels.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, label)?;
        }

        loop {
            let Some(choice) = prompt(reader, out, labels.len())? else {
                break;
            };
            match session.queue_mut().select(id, choice) {
                Ok(()) => {
                    writeln!(out, "  Selected: {}", labels[choice])?;
                    break;
                }
                Err(e @ SelectionError::IndexOutOfRange { .. }) => writeln!(out, "  {}", e)?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    let report = session.finalize_with(&InteractiveSelect);
    print_summary(&report, out)?;
    Ok(report)
}

/// Ask for a 1-based choice. Empty input, `0` or end of input skip the book.
/// Returns a 0-based index, which is range-checked by the queue.
fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    count: usize,
) -> Result<Option<usize>> {
    loop {
        write!(out, "Choose the matching book [1-{}, Enter to skip]: ", count)?;
        out.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim() {
            "" => return Ok(None),
            s => match s.parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(n - 1)),
                Err(_) => writeln!(out, "  '{}' is not a number", s)?,
            },
        }
    }
}

fn print_summary<W: Write>(report: &FinalizeReport, out: &mut W) -> Result<()> {
    if !report.matched.is_empty() {
        writeln!(out, "\nProcessed books:")?;
        for book in &report.matched {
            writeln!(out, "✅ {} by {}", book.title, book.author)?;
        }
    }
    if !report.unmatched.is_empty() {
        writeln!(out, "\nUnprocessed books:")?;
        for query in &report.unmatched {
            writeln!(out, "❌ {}", query)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_core::{CandidateRecord, StaticLookup};
    use std::io::Cursor;

    fn candidate(title: &str, publisher: &str) -> CandidateRecord {
        let mut record = CandidateRecord::default();
        record.volume_info.title = Some(title.to_string());
        record.volume_info.authors = vec!["Ray Dalio".to_string()];
        record.volume_info.publisher = Some(publisher.to_string());
        record
    }

    fn lookup() -> StaticLookup {
        StaticLookup::new().with_records(
            "Principles",
            vec![candidate("Principles", "First"), candidate("Principles", "Second")],
        )
    }

    #[tokio::test]
    async fn test_review_selects_by_number() {
        let lookup = lookup();
        // "9" is rejected, "x" is not a number, "2" picks the second edition
        let mut input = Cursor::new("9\nx\n2\n");
        let mut out = Vec::new();

        let report = review_queries(
            vec![BookQuery::new("Principles"), BookQuery::new("Unknown")],
            &lookup,
            &mut input,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].publisher, "Second");
        assert_eq!(report.unmatched, vec![BookQuery::new("Unknown")]);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1) Principles by Ray Dalio"));
        assert!(out.contains("out of range"));
        assert!(out.contains("'x' is not a number"));
        assert!(out.contains("No matches found"));
        assert!(out.contains("❌ Unknown"));
    }

    #[tokio::test]
    async fn test_review_skip_on_empty_input() {
        let lookup = lookup();
        let mut input = Cursor::new("\n");
        let mut out = Vec::new();

        let queries = vec![BookQuery::new("Principles")];
        let report = review_queries(queries, &lookup, &mut input, &mut out)
            .await
            .unwrap();

        assert!(report.matched.is_empty());
        assert_eq!(report.unmatched.len(), 1);
    }
}
