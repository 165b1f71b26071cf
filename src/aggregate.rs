//! Metrics aggregation over parsed client records.
//!
//! [`aggregate`] is a pure function: it reads the record slice, never mutates
//! it, and returns a fresh [`MetricsSummary`]. Sums and the histogram are a
//! single pass; the revenue ranking is one stable sort.

use std::collections::BTreeMap;

use crate::models::{ClientRecord, ClientRevenue, HeadshotBucket, MetricsSummary, TimelinePoint};

/// Aggregate records into a [`MetricsSummary`].
///
/// An empty slice yields a summary with every total at 0 and every sequence
/// empty.
pub fn aggregate(records: &[ClientRecord]) -> MetricsSummary {
    let total_revenue: f64 = records.iter().map(|r| r.amount).sum();
    let total_clients = records.len();
    let total_headshots: u64 = records.iter().map(|r| r.headshot_count).sum();
    let average_order_value = if total_clients > 0 {
        total_revenue / total_clients as f64
    } else {
        0.0
    };

    MetricsSummary {
        total_revenue,
        total_clients,
        total_headshots,
        average_order_value,
        revenue_by_client: revenue_by_client(records),
        headshot_distribution: headshot_distribution(records),
        revenue_timeline: revenue_timeline(records),
    }
}

/// One entry per record, descending by revenue.
///
/// `sort_by` is stable, so records with equal revenue keep their input order.
fn revenue_by_client(records: &[ClientRecord]) -> Vec<ClientRevenue> {
    let mut ranking: Vec<ClientRevenue> = records
        .iter()
        .map(|r| ClientRevenue {
            client: r.client.clone(),
            revenue: r.amount,
        })
        .collect();
    ranking.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranking
}

fn headshot_distribution(records: &[ClientRecord]) -> Vec<HeadshotBucket> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.headshot_count).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(headshot_count, client_count)| HeadshotBucket {
            headshot_count,
            client_count,
        })
        .collect()
}

fn revenue_timeline(records: &[ClientRecord]) -> Vec<TimelinePoint> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| TimelinePoint {
            position: i + 1,
            revenue: r.amount,
        })
        .collect()
}
