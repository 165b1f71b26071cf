//! CSV row parser for the client-order spreadsheet export.
//!
//! The export has one header line followed by rows with four positional
//! columns: `client, headshotCount, amount, email`. Column names are never
//! checked. Numeric fields are coerced on a best-effort basis: anything that
//! cannot be read becomes 0 instead of failing the whole load.
//!
//! The default [`ParseMode::Naive`] splits each line on every comma and has no
//! quoting support. [`ParseMode::Quoted`] runs the text through the `csv`
//! tokenizer instead, so quoted fields may carry commas.

use crate::config::ParseMode;
use crate::error::Result;
use crate::models::{ClientRecord, FieldWarning, NumericColumn, ParseReport};

/// Parse raw CSV text with the naive comma splitter.
///
/// The first line is discarded unconditionally. Rows whose client label is
/// empty after trimming produce no record. Record order matches row order.
pub fn parse(raw: &str) -> Vec<ClientRecord> {
    parse_naive(raw).records
}

/// Parse raw CSV text and collect a warning for every numeric field that was
/// coerced.
///
/// Warnings never change the records: `parse_with_report(raw,
/// ParseMode::Naive)?.records == parse(raw)`. Only [`ParseMode::Quoted`] can
/// fail, and only on tokenizer errors such as invalid UTF-8.
pub fn parse_with_report(raw: &str, mode: ParseMode) -> Result<ParseReport> {
    match mode {
        ParseMode::Naive => Ok(parse_naive(raw)),
        ParseMode::Quoted => parse_quoted(raw),
    }
}

fn parse_naive(raw: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (idx, line) in raw.trim().split('\n').enumerate().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        push_row(&mut report, idx + 1, &fields);
    }

    report
}

fn parse_quoted(raw: &str) -> Result<ParseReport> {
    let mut report = ParseReport::default();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.trim().as_bytes());

    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
        let fields: Vec<&str> = row.iter().collect();
        push_row(&mut report, line, &fields);
    }

    Ok(report)
}

/// Build one record from positional fields, appending it (and any warnings)
/// to the report. Rows without a client label are skipped entirely.
fn push_row(report: &mut ParseReport, line: usize, fields: &[&str]) {
    let field = |i: usize| fields.get(i).copied().unwrap_or("");

    let client = field(0).trim();
    if client.is_empty() {
        return;
    }

    let headshots_raw = field(1);
    let amount_raw = field(2);

    if !is_clean_count(headshots_raw) {
        report.warnings.push(FieldWarning {
            line,
            column: NumericColumn::HeadshotCount,
            raw: headshots_raw.to_string(),
        });
    }
    if !is_clean_amount(amount_raw) {
        report.warnings.push(FieldWarning {
            line,
            column: NumericColumn::Amount,
            raw: amount_raw.to_string(),
        });
    }

    report.records.push(ClientRecord {
        client: client.to_string(),
        headshot_count: parse_headshots(headshots_raw),
        amount: parse_amount(amount_raw),
        email: field(3).trim().to_string(),
    });
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Coerce a currency field to a number.
///
/// Every character outside `[0-9.]` is removed, then the longest leading
/// decimal (digits with at most one `.`) is parsed. Empty or non-numeric
/// remainders give 0.
///
/// This is a tolerance, not a validator: `"$1,200.50"` reads as `1200.5`, but
/// `"1.2.3"` reads as `1.2` and `"-5"` reads as `5`.
pub fn parse_amount(field: &str) -> f64 {
    let cleaned: String = field
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let prefix = decimal_prefix(&cleaned);
    prefix.parse::<f64>().unwrap_or(0.0)
}

/// Coerce a headshot count field to a non-negative integer.
///
/// Leading whitespace and an optional `+` are accepted, then the leading run
/// of digits is read: `"3.7"` gives 3 and `"4 shots"` gives 4. Empty fields,
/// fields without leading digits, negative values and values too large for a
/// `u64` all give 0.
pub fn parse_headshots(field: &str) -> u64 {
    let trimmed = field.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..end].parse::<u64>().unwrap_or(0)
}

/// Longest prefix of `s` made of digits with at most one decimal point.
fn decimal_prefix(s: &str) -> &str {
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        if c == '.' {
            if seen_dot {
                return &s[..i];
            }
            seen_dot = true;
        } else if !c.is_ascii_digit() {
            return &s[..i];
        }
    }
    s
}

fn is_clean_count(field: &str) -> bool {
    let trimmed = field.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    unsigned.is_empty() || unsigned.parse::<u64>().is_ok()
}

/// An amount is clean when it is empty, or when cleanup left a single
/// well-formed decimal, did not drop a minus sign, and did not start from an
/// abbreviation dot such as the one in `"Rs. 2500"`.
fn is_clean_amount(field: &str) -> bool {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.contains('-') || starts_at_abbreviation_dot(trimmed) {
        return false;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    !cleaned.is_empty()
        && cleaned.chars().any(|c| c.is_ascii_digit())
        && decimal_prefix(&cleaned).len() == cleaned.len()
}

/// True when the first character cleanup keeps is a `.` that belongs to a
/// word (`"Rs."`) or is not followed by a digit (`"Rs. 2500"`).
fn starts_at_abbreviation_dot(field: &str) -> bool {
    let Some(idx) = field.find(|c: char| c.is_ascii_digit() || c == '.') else {
        return false;
    };
    if !field[idx..].starts_with('.') {
        return false;
    }

    let after_word = field[..idx]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphabetic());
    let before_digit = field[idx + 1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());
    after_word || !before_digit
}
