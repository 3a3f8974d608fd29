//! The scrape loop: identifiers → fetch → extract → CSV.
//!
//! Identifiers are processed strictly in order with at most one request in
//! flight. A record-level failure (unreachable host, unreadable body, unknown
//! identifier) is logged with its identifier and skipped; only an output
//! write failure ends the run early.

use crate::errors::ScrapeError;
use crate::fetch::FetchPage;
use crate::models::Identifier;
use crate::outputs::csv::CsvSink;
use crate::scrapers::{Lookup, RecordSource};
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// What happened to each identifier in a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written, placeholder rows included.
    pub written: usize,
    /// Identifiers the register reported as unknown.
    pub not_found: Vec<Identifier>,
    /// Identifiers skipped because of a transport or decode failure.
    pub failed: Vec<Identifier>,
}

/// Run `source` over `identifiers`, writing one row per record to `sink`.
///
/// # Errors
///
/// Only when a row cannot be written to `sink`.
#[instrument(
    level = "info",
    skip_all,
    fields(source = S::NAME, count = identifiers.len())
)]
pub async fn run<S, F>(
    source: &S,
    fetcher: &F,
    identifiers: Vec<Identifier>,
    sink: &mut CsvSink,
) -> Result<RunSummary, ScrapeError>
where
    S: RecordSource,
    F: FetchPage,
{
    let t0 = Instant::now();
    let mut summary = RunSummary::default();

    if identifiers.is_empty() {
        warn!("No identifiers supplied; output will contain the header only");
    }

    // `then` drives one future at a time, keeping requests sequential.
    let pages = stream::iter(identifiers).then(|id| async move {
        let url = source.record_url(&id);
        let body = fetcher.fetch(&url).await;
        (id, url, body)
    });
    let mut pages = std::pin::pin!(pages);

    while let Some((id, url, body)) = pages.next().await {
        let body = match body {
            Ok(b) => b,
            Err(e) => {
                error!(
                    identifier = %id,
                    %url,
                    error = %e,
                    "Could not scrape data: connection failed"
                );
                summary.failed.push(id);
                continue;
            }
        };
        info!(identifier = %id, "Scraping data");

        match source.interpret(&id, &body) {
            Ok(Lookup::Found(row)) => {
                sink.write_row(&row)?;
                summary.written += 1;
            }
            Ok(Lookup::NotFound { fallback }) => {
                warn!(
                    identifier = %id,
                    "Could not scrape data: register returned no results"
                );
                if let Some(row) = fallback {
                    sink.write_row(&row)?;
                    summary.written += 1;
                }
                summary.not_found.push(id);
            }
            Err(e) => {
                error!(
                    identifier = %id,
                    error = %e,
                    body_preview = %truncate_for_log(&body, 200),
                    "Could not scrape data: unreadable response"
                );
                summary.failed.push(id);
            }
        }
    }

    let elapsed = t0.elapsed();
    info!(
        written = summary.written,
        not_found = summary.not_found.len(),
        failed = summary.failed.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Run complete"
    );
    Ok(summary)
}
