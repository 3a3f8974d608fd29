//! Identifier input.
//!
//! Identifiers come from an optional list file followed by any given on the
//! command line. List files hold one identifier per line; blank lines and
//! `#` comments are skipped. Order is preserved and duplicates are kept.

use crate::errors::ScrapeError;
use crate::models::Identifier;
use std::path::Path;
use tracing::{info, instrument};

/// Parse identifier list text.
pub fn parse_list(text: &str) -> Vec<Identifier> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Collect the identifiers for a run: file entries first, then `extra`.
#[instrument(level = "info", skip(extra))]
pub fn collect(file: Option<&Path>, extra: &[String]) -> Result<Vec<Identifier>, ScrapeError> {
    let mut ids = match file {
        Some(path) => parse_list(&std::fs::read_to_string(path)?),
        None => Vec::new(),
    };
    ids.extend(
        extra
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
    info!(count = ids.len(), "Collected identifiers");
    Ok(ids)
}
