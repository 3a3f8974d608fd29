//! Runtime settings for the scrapers.
//!
//! Settings come from an optional YAML file; anything the file leaves out falls
//! back to the built-in defaults, which point at the live registers. Command-line
//! overrides are applied on top and the result is validated once before the run.
//!
//! ```yaml
//! http:
//!   timeout_secs: 20
//! ukipo:
//!   not_found_title: "Search for a trade mark"
//! ```

use crate::errors::ScrapeError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_EUIPO_BASE_URL: &str =
    "https://euipo.europa.eu/copla//trademark/data/withOppoRelations/";
pub const DEFAULT_UKIPO_BASE_URL: &str = "https://trademarks.ipo.gov.uk/ipo-tmcase/";

/// Top-level settings file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub euipo: EuipoSettings,
    pub ukipo: UkipoSettings,
}

/// Transport settings shared by both sources.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpSettings {
    /// Whole-request timeout, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("tm_scrape/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// EU register (JSON) settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EuipoSettings {
    /// Prefix the trademark number is appended to.
    pub base_url: String,
    /// Value of the top-level `message` field that marks an unknown number.
    pub not_found_message: String,
}

impl Default for EuipoSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EUIPO_BASE_URL.to_string(),
            not_found_message: "404 Not Found".to_string(),
        }
    }
}

/// UK register (HTML) settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct UkipoSettings {
    /// Site root; `page/Results/1/<identifier>` is appended per request.
    pub base_url: String,
    /// First `<h1>` text of the search page the register falls back to.
    pub not_found_title: String,
    /// Text written to the `Filed` column of a not-found placeholder row.
    pub not_found_filed_text: String,
}

impl Default for UkipoSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UKIPO_BASE_URL.to_string(),
            not_found_title: "Search for a trade mark".to_string(),
            not_found_filed_text: "No data found.".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return the defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ScrapeError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&text)?;
        info!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ScrapeError> {
        // An empty file deserializes to null rather than an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.http.timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        for (name, base) in [
            ("euipo.base_url", &self.euipo.base_url),
            ("ukipo.base_url", &self.ukipo.base_url),
        ] {
            Url::parse(base).map_err(|e| {
                ScrapeError::Config(format!("{name} `{base}` is not a URL: {e}"))
            })?;
        }
        Ok(())
    }
}
