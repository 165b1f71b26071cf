//! CSV transport: fetches the raw spreadsheet export.
//!
//! The fetcher owns a lazily built blocking HTTP client. [`SheetFetcher::load_records`]
//! applies the degrade policy: any transport failure is logged and turned
//! into an empty record list, so a broken link shows an empty dashboard
//! instead of an error.

use std::fs;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::{CsvSource, ParseMode};
use crate::error::{DashboardError, Result};
use crate::models::ClientRecord;
use crate::parser;

/// Fetches CSV text from a [`CsvSource`].
pub struct SheetFetcher {
    /// Where the CSV text is read from.
    pub source: CsvSource,
    timeout: Duration,
    client: Option<Client>,
}

impl SheetFetcher {
    /// Create a fetcher. No connection is opened until the first fetch.
    pub fn new(source: CsvSource, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            self.client = Some(build_client(self.timeout)?);
        }
        self.client
            .as_ref()
            .ok_or_else(|| DashboardError::NotConfigured("HTTP client".into()))
    }

    /// Read the raw CSV text.
    ///
    /// HTTP status errors are reported as [`DashboardError::Http`].
    pub fn fetch_text(&mut self) -> Result<String> {
        match self.source.clone() {
            CsvSource::Url(url) => {
                debug!(%url, "fetching sheet export");
                let resp = self.client()?.get(&url).send()?.error_for_status()?;
                Ok(resp.text()?)
            }
            CsvSource::File(path) => {
                debug!(path = %path.display(), "reading sheet export");
                Ok(fs::read_to_string(path)?)
            }
            CsvSource::Text(text) => Ok(text),
        }
    }

    /// Fetch and parse records, degrading every failure to an empty list.
    pub fn load_records(&mut self, mode: ParseMode) -> Vec<ClientRecord> {
        let result = self
            .fetch_text()
            .and_then(|text| parser::parse_with_report(&text, mode));

        match result {
            Ok(report) => {
                for w in &report.warnings {
                    debug!(
                        line = w.line,
                        column = ?w.column,
                        raw = %w.raw,
                        "numeric field coerced"
                    );
                }
                debug!(
                    records = report.records.len(),
                    warnings = report.warnings.len(),
                    "parsed sheet export"
                );
                report.records
            }
            Err(e) => {
                warn!(error = %e, "failed to load sheet data, showing empty dashboard");
                Vec::new()
            }
        }
    }

    /// Drop the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

/// Blocking client shared by the sheet fetcher and the webhook client.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?)
}
