use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClientRecord — One parsed spreadsheet row
// ---------------------------------------------------------------------------

/// A single client order parsed from one spreadsheet row.
///
/// `client` is never empty; rows without a client label are dropped by the
/// parser. Numeric fields have already been coerced (unparsable values are 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub client: String,
    pub headshot_count: u64,
    pub amount: f64,
    pub email: String,
}

// ---------------------------------------------------------------------------
// FieldWarning — Non-fatal numeric coercion notice
// ---------------------------------------------------------------------------

/// Which numeric column a [`FieldWarning`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericColumn {
    HeadshotCount,
    Amount,
}

/// A numeric field that could not be read cleanly and was coerced.
///
/// `line` is the 1-based line number in the raw text (the header is line 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWarning {
    pub line: usize,
    pub column: NumericColumn,
    pub raw: String,
}

/// Parsed records together with the coercion notices raised while parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub records: Vec<ClientRecord>,
    pub warnings: Vec<FieldWarning>,
}
