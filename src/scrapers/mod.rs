//! Trademark register scrapers.
//!
//! Each register is a [`RecordSource`]: it knows how to turn an identifier
//! into a request URL and how to turn the response body into one output row.
//! Interpretation is pure, so every extractor is testable from a fixture string.
//!
//! # Supported Registers
//!
//! | Register | Module | Payload | Not-found signal |
//! |----------|--------|---------|------------------|
//! | EUIPO | [`euipo`] | JSON `entity` document | `message` sentinel; record skipped |
//! | UKIPO | [`ukipo`] | HTML result page | search-page `<h1>`; placeholder row |
//!
//! # Extraction Rules
//!
//! Every output field is looked up on its own and resolves to `Option<String>`;
//! `None` becomes an empty cell when the row is assembled. A missing or
//! malformed field therefore never discards the rest of the record.

pub mod euipo;
pub mod ukipo;

use crate::errors::ScrapeError;
use serde::Serialize;

/// Result of interpreting one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<R> {
    /// The register holds this record.
    Found(R),
    /// The register answered but has no such record. `fallback` is the row
    /// to write anyway, if the register's output keeps a line per identifier.
    NotFound { fallback: Option<R> },
}

/// A register that can be queried one identifier at a time.
pub trait RecordSource {
    /// Output row type; serialized field order is the column order.
    type Row: Serialize;

    /// Short register name used in logs.
    const NAME: &'static str;

    /// Column names, written once before any row.
    fn header(&self) -> &'static [&'static str];

    /// The single URL to GET for `identifier`.
    fn record_url(&self, identifier: &str) -> String;

    /// Turn a response body into a row.
    ///
    /// # Errors
    ///
    /// Only when the body as a whole cannot be read (e.g. invalid JSON);
    /// individual fields never fail.
    fn interpret(&self, identifier: &str, body: &str) -> Result<Lookup<Self::Row>, ScrapeError>;
}

/// Append a path-encoded identifier to `base`, inserting a `/` if needed.
pub(crate) fn join_identifier(base: &str, identifier: &str) -> String {
    let encoded = urlencoding::encode(identifier);
    if base.ends_with('/') {
        format!("{base}{encoded}")
    } else {
        format!("{base}/{encoded}")
    }
}
