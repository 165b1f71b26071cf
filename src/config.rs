use std::path::PathBuf;
use std::time::Duration;

/// Default HTTP timeout for sheet downloads and webhook calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Currency suffix used by the formatted card values.
pub const DEFAULT_CURRENCY: &str = "PKR";

/// Default number of rows shown on the client leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Greeting that opens every chat session.
pub const CHAT_GREETING: &str = "Hello! I can help you query and manage your spreadsheet data. \
     Try asking me questions about your clients, revenue, or headshot orders.";

/// Where the raw CSV text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    /// A CSV export URL, fetched with a blocking GET.
    Url(String),
    /// A CSV file on the local filesystem.
    File(PathBuf),
    /// CSV text supplied directly (test doubles, piped data).
    Text(String),
}

/// How lines are split into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Split every line on `,` with no quoting support.
    #[default]
    Naive,
    /// RFC 4180 tokenizer: quoted fields may contain commas and newlines.
    Quoted,
}
