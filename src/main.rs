//! # tm_scrape
//!
//! Pulls bibliographic data for a list of trademarks from a public register and
//! writes one CSV row per record.
//!
//! ## Registers
//!
//! - **EUIPO**: JSON document per trademark number
//! - **UKIPO**: HTML case page per trademark
//!
//! ## Usage
//!
//! ```sh
//! tm_scrape euipo --input eu_numbers.txt
//! tm_scrape ukipo UK00003456789 -o uk.csv
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential pass:
//! 1. **Identifiers**: read from `--input` and the command line
//! 2. **Fetching**: one GET per identifier, failures logged and skipped
//! 3. **Extraction**: each column looked up independently, missing ones left empty
//! 4. **Output**: header once, then one CSV row per record

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod errors;
mod fetch;
mod identifiers;
mod models;
mod outputs;
mod runner;
mod scrapers;
mod utils;

use cli::{Cli, Register};
use config::Settings;
use fetch::{FetchPage, HttpFetcher};
use models::Identifier;
use outputs::csv::CsvSink;
use runner::{RunSummary, run};
use scrapers::RecordSource;
use scrapers::euipo::Euipo;
use scrapers::ukipo::Ukipo;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("tm_scrape starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = match resolve_settings(&args) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Invalid settings");
            return Err(e.into());
        }
    };

    let ids = identifiers::collect(args.input.as_deref(), args.register.ids())?;
    let fetcher = HttpFetcher::new(&settings.http)?;
    let output = args.output_path();
    info!(
        path = %output.display(),
        timeout_secs = settings.http.timeout_secs,
        "Prepared run"
    );

    let summary = match &args.register {
        Register::Euipo { .. } => {
            scrape(&Euipo::new(settings.euipo.clone()), &fetcher, ids, &output).await?
        }
        Register::Ukipo { .. } => {
            scrape(&Ukipo::new(settings.ukipo.clone()), &fetcher, ids, &output).await?
        }
    };

    if !summary.failed.is_empty() {
        debug!(identifiers = ?summary.failed, "Identifiers skipped after failures");
    }
    if !summary.not_found.is_empty() {
        debug!(identifiers = ?summary.not_found, "Identifiers not found in register");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Load the settings file and apply command-line overrides.
fn resolve_settings(args: &Cli) -> Result<Settings, errors::ScrapeError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(secs) = args.timeout_secs {
        settings.http.timeout_secs = secs;
    }
    if let Some(base) = &args.base_url {
        match args.register {
            Register::Euipo { .. } => settings.euipo.base_url = base.clone(),
            Register::Ukipo { .. } => settings.ukipo.base_url = base.clone(),
        }
    }
    settings.validate()?;
    Ok(settings)
}

/// Open the output, run the source over every identifier and close the output.
async fn scrape<S, F>(
    source: &S,
    fetcher: &F,
    ids: Vec<Identifier>,
    output: &std::path::Path,
) -> Result<RunSummary, Box<dyn Error>>
where
    S: RecordSource,
    F: FetchPage,
{
    let mut sink = CsvSink::create(output, source.header())?;
    let summary = run(source, fetcher, ids, &mut sink).await?;
    let rows = sink.finish()?;
    info!(register = S::NAME, rows, path = %output.display(), "Wrote output");
    Ok(summary)
}
