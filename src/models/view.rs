use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LeaderboardEntry — Top clients by revenue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based rank.
    pub rank: usize,
    pub client: String,
    pub revenue: f64,
    /// Revenue as a percentage of the top entry's revenue.
    pub share_of_top: f64,
}

// ---------------------------------------------------------------------------
// DistributionBar — Headshot histogram bar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBar {
    pub headshot_count: u64,
    pub client_count: usize,
    /// Bar length: percentage of the largest bucket.
    pub share_of_max: f64,
    /// Percentage of all clients.
    pub share_of_total: f64,
}

// ---------------------------------------------------------------------------
// ChartPoint — Revenue timeline column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub position: usize,
    pub revenue: f64,
    /// Column height in percent, min-max normalised over the timeline.
    pub height: f64,
}

// ---------------------------------------------------------------------------
// MetricCards — Headline values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCards {
    pub total_revenue: String,
    pub total_clients: String,
    pub total_headshots: String,
    pub average_order_value: String,
}
