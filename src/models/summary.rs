use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClientRevenue — Entry of the revenue ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRevenue {
    pub client: String,
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// HeadshotBucket — Entry of the headshot histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadshotBucket {
    pub headshot_count: u64,
    pub client_count: usize,
}

// ---------------------------------------------------------------------------
// TimelinePoint — Revenue in original row order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// 1-based index of the record in parse order.
    pub position: usize,
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// MetricsSummary — Aggregated dashboard metrics
// ---------------------------------------------------------------------------

/// Metrics derived from one record list.
///
/// Built fresh on every load; nothing in the crate mutates a summary after
/// [`aggregate`](crate::aggregate::aggregate) returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_revenue: f64,
    pub total_clients: usize,
    pub total_headshots: u64,
    pub average_order_value: f64,
    /// Descending by revenue; equal revenues keep record order.
    pub revenue_by_client: Vec<ClientRevenue>,
    /// One bucket per distinct headshot count, ascending.
    pub headshot_distribution: Vec<HeadshotBucket>,
    pub revenue_timeline: Vec<TimelinePoint>,
}

impl MetricsSummary {
    /// True when the summary was built from zero records.
    pub fn is_empty(&self) -> bool {
        self.total_clients == 0
    }
}
