//! Command-line interface definitions for tm_scrape.
//!
//! One subcommand per register; the input, output and transport options are
//! shared and may appear before or after the subcommand.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for tm_scrape.
///
/// # Examples
///
/// ```sh
/// # EU register, numbers from a file
/// tm_scrape euipo --input eu_numbers.txt
///
/// # UK register, identifiers inline, custom output
/// tm_scrape ukipo UK00003456789 UK00003456790 -o uk.csv
///
/// # Slow network, settings file
/// tm_scrape --config tm_scrape.yaml --timeout-secs 60 euipo 018001234
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Register to query
    #[command(subcommand)]
    pub register: Register,

    /// File with one identifier per line (`#` comments and blank lines ignored)
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Output CSV path (default: euiposcrape.csv or tmdata.csv)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Optional path to a YAML settings file
    #[arg(short, long, global = true, env = "TM_SCRAPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds, overriding the settings file
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Base URL of the selected register, overriding the settings file
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Register {
    /// EU Intellectual Property Office (JSON API, numeric identifiers)
    Euipo {
        /// Trademark numbers, processed after any from --input
        ids: Vec<String>,
    },
    /// UK Intellectual Property Office (HTML case pages)
    Ukipo {
        /// Trademark identifiers, processed after any from --input
        ids: Vec<String>,
    },
}

impl Register {
    pub fn ids(&self) -> &[String] {
        match self {
            Register::Euipo { ids } | Register::Ukipo { ids } => ids,
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self {
            Register::Euipo { .. } => "euiposcrape.csv",
            Register::Ukipo { .. } => "tmdata.csv",
        }
    }
}

impl Cli {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.register.default_output()))
    }
}
