//! Error type shared by the fetch, config and output layers.
//!
//! Field-level extraction never produces one of these: a missing or malformed
//! field resolves to an empty cell instead. Only whole-record failures
//! (transport, undecodable body) and run-level failures (config, output file)
//! are represented here.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("could not read config file: {0}")]
    ConfigFormat(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}
