//! Render-ready numbers derived from a [`MetricsSummary`].
//!
//! Nothing here draws anything. These helpers compute the bar lengths, chart
//! heights and formatted card values a rendering layer needs, so every
//! frontend shows the same figures.

use crate::models::{ChartPoint, DistributionBar, LeaderboardEntry, MetricCards, MetricsSummary};

/// Top `limit` clients by revenue, with each revenue as a percentage of the
/// first entry's revenue.
///
/// When the top revenue is 0 every share is 0.
pub fn leaderboard(summary: &MetricsSummary, limit: usize) -> Vec<LeaderboardEntry> {
    let top = summary
        .revenue_by_client
        .first()
        .map(|e| e.revenue)
        .unwrap_or(0.0);

    summary
        .revenue_by_client
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, e)| LeaderboardEntry {
            rank: i + 1,
            client: e.client.clone(),
            revenue: e.revenue,
            share_of_top: percent(e.revenue, top),
        })
        .collect()
}

/// Headshot histogram bars, scaled against the largest bucket and against the
/// total client count.
pub fn distribution_bars(summary: &MetricsSummary) -> Vec<DistributionBar> {
    let max_clients = summary
        .headshot_distribution
        .iter()
        .map(|b| b.client_count)
        .max()
        .unwrap_or(0);

    summary
        .headshot_distribution
        .iter()
        .map(|b| DistributionBar {
            headshot_count: b.headshot_count,
            client_count: b.client_count,
            share_of_max: percent(b.client_count as f64, max_clients as f64),
            share_of_total: percent(b.client_count as f64, summary.total_clients as f64),
        })
        .collect()
}

/// Timeline columns with min-max normalised heights.
///
/// A flat timeline (all revenues equal) uses a range of 1, so every column
/// has height 0.
pub fn timeline_chart(summary: &MetricsSummary) -> Vec<ChartPoint> {
    let timeline = &summary.revenue_timeline;
    let min = timeline.iter().map(|p| p.revenue).fold(f64::INFINITY, f64::min);
    let max = timeline
        .iter()
        .map(|p| p.revenue)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min > 0.0 { max - min } else { 1.0 };

    timeline
        .iter()
        .map(|p| ChartPoint {
            position: p.position,
            revenue: p.revenue,
            height: (p.revenue - min) / range * 100.0,
        })
        .collect()
}

impl MetricCards {
    /// Format the four headline values of a summary.
    pub fn from_summary(summary: &MetricsSummary, currency: &str) -> Self {
        Self {
            total_revenue: format_currency(summary.total_revenue, currency),
            total_clients: group_thousands(&summary.total_clients.to_string()),
            total_headshots: group_thousands(&summary.total_headshots.to_string()),
            average_order_value: format_rounded_currency(summary.average_order_value, currency),
        }
    }
}

/// `value` with thousands separators, at most two fraction digits, and a
/// currency suffix: `2100.5` becomes `"2,100.5 PKR"`.
pub fn format_currency(value: f64, currency: &str) -> String {
    format!("{} {}", format_number(value), currency)
}

/// Like [`format_currency`] but rounded to a whole number first.
pub fn format_rounded_currency(value: f64, currency: &str) -> String {
    format_currency(value.round(), currency)
}

fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && fixed != "0.00" {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
