//! Record fetching over HTTP.
//!
//! The pipeline only talks to the [`FetchPage`] trait, so the transport can be
//! swapped out (tests use an in-memory map of URL to body).
//!
//! # Request Policy
//!
//! - Exactly one GET per identifier, no retries
//! - Explicit timeout taken from the settings, never the client's silent default
//! - Non-2xx statuses are not errors: both registers report a missing record in
//!   the body, so the body is always returned for interpretation. They are
//!   logged at `warn` with the URL so a misbehaving endpoint stays visible
//! - Transport errors are logged here at `debug` only; the caller reports the
//!   failed identifier once

use crate::config::HttpSettings;
use crate::errors::ScrapeError;
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Trait for retrieving the raw body behind a record URL.
pub trait FetchPage {
    /// Fetch `url` and return its body as text.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] when no response could be obtained
    /// (DNS, refused connection, timeout, broken body).
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`FetchPage`] implementation backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and user agent.
    pub fn new(settings: &HttpSettings) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let t0 = Instant::now();
        let res = self.client.get(url).send().await;
        let response = match res {
            Ok(r) => r,
            Err(e) => {
                debug!(elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "GET failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        report_status(url, status);
        let body = response.text().await?;
        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "GET completed"
        );
        Ok(body)
    }
}

fn report_status(url: &str, status: StatusCode) {
    if !status.is_success() {
        warn!(%url, %status, "Non-success HTTP status; passing body on");
    }
}
