//! Async wrapper around [`Dashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all dashboard operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! Refreshes may overlap. Each [`refresh()`](AsyncDashboard::refresh) takes a
//! generation number when it starts, and its summary is only published if no
//! newer generation has been published first, so a slow fetch can never
//! overwrite a fresher result.
//!
//! # Example
//!
//! ```no_run
//! use sheet_metrics::{AsyncDashboard, Dashboard};
//!
//! #[tokio::main]
//! async fn main() {
//!     let builder = Dashboard::builder().sheet_url("https://example.com/export?format=csv");
//!     let dashboard = AsyncDashboard::build(builder).await.unwrap();
//!
//!     let refreshed = dashboard.refresh().await.unwrap();
//!     println!("{} clients", refreshed.summary.total_clients);
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::MetricsSummary;
use crate::{Dashboard, DashboardBuilder};

/// Result of one [`AsyncDashboard::refresh`].
#[derive(Debug, Clone, PartialEq)]
pub struct Refreshed {
    /// Generation assigned when the refresh started (1-based).
    pub generation: u64,
    pub summary: MetricsSummary,
    /// False when a newer refresh had already been published; the summary is
    /// stale and was not stored.
    pub current: bool,
}

#[derive(Default)]
struct Published {
    generation: u64,
    summary: Option<MetricsSummary>,
}

// ---------------------------------------------------------------------------
// AsyncDashboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`Dashboard`].
///
/// The underlying [`Dashboard`] is protected by a [`Mutex`] since it uses
/// `RefCell` internally.
pub struct AsyncDashboard {
    inner: Arc<Mutex<Dashboard>>,
    next_generation: AtomicU64,
    published: Arc<Mutex<Published>>,
}

impl AsyncDashboard {
    /// Build the dashboard on the blocking thread pool.
    pub async fn build(builder: DashboardBuilder) -> Result<Self> {
        let dashboard = tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))??;
        Ok(Self::new(dashboard))
    }

    /// Wrap an already built dashboard.
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dashboard)),
            next_generation: AtomicU64::new(0),
            published: Arc::new(Mutex::new(Published::default())),
        }
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    ///
    /// The closure receives a `&Dashboard` reference and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Dashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = dashboard
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("Dashboard lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch, parse and aggregate without touching the published summary.
    pub async fn load(&self) -> Result<MetricsSummary> {
        self.run(|d| Ok(d.load())).await
    }

    /// Load a fresh summary and publish it unless a newer refresh won.
    pub async fn refresh(&self) -> Result<Refreshed> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let summary = self.load().await?;

        let mut published = self
            .published
            .lock()
            .map_err(|_| DashboardError::InvalidArgument("Published lock poisoned".into()))?;
        let current = generation > published.generation;
        if current {
            published.generation = generation;
            published.summary = Some(summary.clone());
        } else {
            debug!(
                generation,
                published = published.generation,
                "discarding stale refresh"
            );
        }

        Ok(Refreshed {
            generation,
            summary,
            current,
        })
    }

    /// The most recently published summary, if any refresh has completed.
    pub fn latest(&self) -> Option<MetricsSummary> {
        self.published
            .lock()
            .ok()
            .and_then(|p| p.summary.clone())
    }

    /// Generation of the most recently published summary (0 before the first).
    pub fn published_generation(&self) -> u64 {
        self.published.lock().map(|p| p.generation).unwrap_or(0)
    }

    /// Close the dashboard, dropping it on the blocking thread pool.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let dashboard = self
                .inner
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("Dashboard lock poisoned".into()))?;
            dashboard.close();
            drop(dashboard);
            drop(self.inner);
            Ok(())
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
