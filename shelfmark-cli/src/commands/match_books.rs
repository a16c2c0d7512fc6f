//! Automatic matching command implementation

use super::{build_lookup, load_queries, report_outcome};
use crate::LookupArgs;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use shelfmark_core::{AutoTopMatch, BookQuery, MetadataLookup, Session};

/// Look up every book and take the top result for each
pub async fn match_books(args: &LookupArgs, input: Option<&str>, output: &str) -> Result<()> {
    let queries = load_queries(input)?;
    let lookup = build_lookup(args)?;

    println!("Processing books...");
    auto_match(queries, &lookup, output).await
}

/// Shared by `match` and `import-detected`: prefetch with progress, finalize
/// with the top-match policy, then write and report.
pub(super) async fn auto_match(
    queries: Vec<BookQuery>,
    lookup: &dyn MetadataLookup,
    output: &str,
) -> Result<()> {
    let mut session = Session::new();
    let admitted = session.queue_mut().extend(queries);

    let pb = ProgressBar::new(admitted as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}")?
            .progress_chars("##-"),
    );

    for id in session.queue().ids() {
        if let Some(entry) = session.queue().get(id) {
            pb.set_message(entry.query().title.clone());
        }
        session.queue_mut().candidates(id, lookup).await?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let report = session.finalize_with(&AutoTopMatch);
    tracing::info!(
        "Matched {} of {} books",
        report.matched.len(),
        report.total()
    );

    report_outcome(&report, output)
}
