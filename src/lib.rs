//! Spreadsheet metrics SDK for Rust.
//!
//! Loads a client-order spreadsheet exported as CSV, parses it into typed
//! records, and aggregates dashboard metrics: totals, a revenue ranking, a
//! headshot-count histogram and a revenue timeline. A chat session can proxy
//! natural-language questions to an external workflow-automation webhook.
//!
//! # Quick start
//!
//! ```no_run
//! use sheet_metrics::{ChatSession, Dashboard};
//!
//! let dashboard = Dashboard::builder()
//!     .sheet_url("https://example.com/sheet/export?format=csv")
//!     .webhook_url("https://example.com/webhook/sheet-access")
//!     .build()
//!     .unwrap();
//!
//! // Fetch, parse and aggregate
//! let summary = dashboard.load();
//! println!("{}", dashboard.cards(&summary).total_revenue);
//!
//! // Ask the assistant
//! let mut session = ChatSession::new();
//! let turn = dashboard.ask(&mut session, "Who ordered the most headshots?").unwrap();
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod source;
pub mod views;

pub use aggregate::aggregate;
#[cfg(feature = "async")]
pub use async_client::AsyncDashboard;
pub use chat::{extract_output_text, ChatSession, WebhookClient};
pub use config::{CsvSource, ParseMode};
pub use error::{DashboardError, Result};
pub use models::{ClientRecord, MetricCards, MetricsSummary};
pub use parser::{parse, parse_amount, parse_with_report};
pub use source::SheetFetcher;

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::models::{ChartPoint, ChatTurn, DistributionBar, LeaderboardEntry};

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain a builder, set a CSV source and
/// optionally a webhook, and call [`build()`](DashboardBuilder::build).
pub struct DashboardBuilder {
    source: Option<CsvSource>,
    webhook_url: Option<String>,
    timeout: Duration,
    parse_mode: ParseMode,
    currency: String,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            source: None,
            webhook_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            parse_mode: ParseMode::default(),
            currency: config::DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl DashboardBuilder {
    /// Set the CSV source directly.
    pub fn source(mut self, source: CsvSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Read the spreadsheet from a CSV export URL.
    pub fn sheet_url(self, url: impl Into<String>) -> Self {
        self.source(CsvSource::Url(url.into()))
    }

    /// Read the spreadsheet from a local CSV file.
    pub fn csv_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.source(CsvSource::File(path.as_ref().to_path_buf()))
    }

    /// Use fixed CSV text as the spreadsheet.
    pub fn csv_text(self, text: impl Into<String>) -> Self {
        self.source(CsvSource::Text(text.into()))
    }

    /// Set the chat webhook URL. Without one, [`Dashboard::ask`] fails with
    /// [`DashboardError::NotConfigured`].
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Set the HTTP timeout for sheet downloads and webhook calls.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose how CSV lines are split. Defaults to [`ParseMode::Naive`].
    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// Currency suffix for formatted values. Defaults to `"PKR"`.
    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    /// Build the dashboard.
    ///
    /// Fails if no CSV source was set or the webhook URL is empty. Nothing is
    /// fetched until [`Dashboard::load`] is called.
    pub fn build(self) -> Result<Dashboard> {
        let source = self
            .source
            .ok_or_else(|| DashboardError::NotConfigured("no CSV source set".into()))?;
        let webhook = match self.webhook_url {
            Some(url) => Some(WebhookClient::new(url, self.timeout)?),
            None => None,
        };

        Ok(Dashboard {
            fetcher: RefCell::new(SheetFetcher::new(source, self.timeout)),
            webhook,
            parse_mode: self.parse_mode,
            currency: self.currency,
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The main entry point: a configured CSV source plus an optional chat
/// webhook.
///
/// Every [`load`](Self::load) fetches and aggregates from scratch; nothing is
/// cached between loads.
pub struct Dashboard {
    fetcher: RefCell<SheetFetcher>,
    webhook: Option<WebhookClient>,
    parse_mode: ParseMode,
    currency: String,
}

impl Dashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    // -- Data --------------------------------------------------------------

    /// Fetch and parse the spreadsheet.
    ///
    /// Transport failures are logged and produce an empty list.
    pub fn records(&self) -> Vec<ClientRecord> {
        self.fetcher.borrow_mut().load_records(self.parse_mode)
    }

    /// Fetch, parse and aggregate the spreadsheet.
    ///
    /// Never fails: an unreachable sheet yields a zeroed summary.
    pub fn load(&self) -> MetricsSummary {
        let records = self.records();
        let summary = aggregate(&records);
        debug!(
            clients = summary.total_clients,
            revenue = summary.total_revenue,
            headshots = summary.total_headshots,
            "aggregated dashboard metrics"
        );
        summary
    }

    // -- Views -------------------------------------------------------------

    /// Formatted headline card values.
    pub fn cards(&self, summary: &MetricsSummary) -> MetricCards {
        MetricCards::from_summary(summary, &self.currency)
    }

    /// Top clients by revenue (five entries).
    pub fn leaderboard(&self, summary: &MetricsSummary) -> Vec<LeaderboardEntry> {
        views::leaderboard(summary, config::LEADERBOARD_SIZE)
    }

    /// Headshot histogram bars.
    pub fn distribution(&self, summary: &MetricsSummary) -> Vec<DistributionBar> {
        views::distribution_bars(summary)
    }

    /// Revenue timeline chart columns.
    pub fn timeline(&self, summary: &MetricsSummary) -> Vec<ChartPoint> {
        views::timeline_chart(summary)
    }

    // -- Chat --------------------------------------------------------------

    /// Ask the chat webhook a question, recording the exchange in `session`.
    ///
    /// Returns `Ok(None)` for blank input. Webhook failures are recorded as
    /// error messages in the session rather than returned.
    pub fn ask(&self, session: &mut ChatSession, text: &str) -> Result<Option<ChatTurn>> {
        let client = self
            .webhook
            .as_ref()
            .ok_or_else(|| DashboardError::NotConfigured("no webhook URL set".into()))?;
        Ok(session.ask(client, text))
    }

    /// The configured CSV source.
    pub fn source(&self) -> CsvSource {
        self.fetcher.borrow().source.clone()
    }

    /// Currency suffix used by [`cards`](Self::cards).
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Release the HTTP client used for sheet downloads.
    pub fn close(&self) {
        self.fetcher.borrow_mut().close();
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.fetcher.borrow().source {
            CsvSource::Url(url) => format!("url:{}", url),
            CsvSource::File(path) => format!("file:{}", path.display()),
            CsvSource::Text(text) => format!("text:{} bytes", text.len()),
        };
        write!(
            f,
            "Dashboard(source={}, webhook={}, mode={:?}, currency={})",
            source,
            self.webhook.as_ref().map(|w| w.url()).unwrap_or("none"),
            self.parse_mode,
            self.currency
        )
    }
}
