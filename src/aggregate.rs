// src/aggregate.rs
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::fetch::SourceFetcher;
use crate::sources::types::{Interruption, SourceDescriptor};

/// The only failure a client can ever see: an unexpected fault in the shared
/// merge stage. Per-source failures are contained long before this type.
#[derive(Debug, Error)]
#[error("aggregation failed: {0}")]
pub struct AggregationError(pub String);

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "sources_records_total",
            "Records normalized per source."
        );
        describe_counter!(
            "sources_fetch_errors_total",
            "Source fetch/parse failures (contained)."
        );
        describe_counter!(
            "aggregate_dedup_dropped_total",
            "Records dropped as coordinate duplicates."
        );
        describe_counter!(
            "aggregate_no_coords_dropped_total",
            "Records dropped for missing or malformed coordinates."
        );
        describe_histogram!(
            "sources_fetch_ms",
            "Per-source fetch+normalize time in milliseconds."
        );
        describe_gauge!(
            "aggregate_last_run_ts",
            "Unix ts of the last aggregation cycle."
        );
    });
}

/// Orchestrates one fetch-and-merge cycle over the whole registry. Cheap to
/// clone; both handles are shared.
#[derive(Clone)]
pub struct Aggregator {
    registry: Arc<Vec<SourceDescriptor>>,
    fetcher: Arc<SourceFetcher>,
}

impl Aggregator {
    pub fn new(registry: Vec<SourceDescriptor>, fetcher: SourceFetcher) -> Self {
        Self {
            registry: Arc::new(registry),
            fetcher: Arc::new(fetcher),
        }
    }

    /// Run one aggregation cycle. The fan-out itself cannot fail (sources
    /// fail soft to empty batches); the spawned task converts a panic in the
    /// merge stage into the one user-visible error.
    pub async fn run(&self) -> Result<Vec<Interruption>, AggregationError> {
        let this = self.clone();
        tokio::spawn(async move { this.collect().await })
            .await
            .map_err(|e| AggregationError(e.to_string()))
    }

    /// Fan out across every registered source, wait until all of them have
    /// settled, then merge in registry order and dedup by exact coordinate.
    async fn collect(&self) -> Vec<Interruption> {
        ensure_metrics_described();

        let fetches = self
            .registry
            .iter()
            .map(|source| self.fetcher.fetch_source(source));
        let batches = join_all(fetches).await;

        let combined: Vec<Interruption> = batches.into_iter().flatten().collect();
        let unique = dedup_by_coordinate(combined);

        gauge!("aggregate_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        tracing::info!(unique = unique.len(), "aggregation cycle done");

        unique
    }
}

/// First-wins dedup on the exact coordinate pair, preserving first-seen
/// order. Keys are the IEEE-754 bit patterns of both axes, so two feeds only
/// merge when they report the bit-identical position; records without a
/// two-component pair are dropped here.
pub fn dedup_by_coordinate(records: Vec<Interruption>) -> Vec<Interruption> {
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());
    let mut dropped_dup = 0u64;
    let mut dropped_no_coords = 0u64;

    for record in records {
        let Some((lon, lat)) = record.coordinate_pair() else {
            dropped_no_coords += 1;
            continue;
        };
        if !seen.insert((lon.to_bits(), lat.to_bits())) {
            dropped_dup += 1;
            continue;
        }
        unique.push(record);
    }

    counter!("aggregate_dedup_dropped_total").increment(dropped_dup);
    counter!("aggregate_no_coords_dropped_total").increment(dropped_no_coords);

    unique
}
