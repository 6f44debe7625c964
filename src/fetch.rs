// src/fetch.rs
use std::sync::Arc;

use metrics::{counter, histogram};
use serde_json::Value;

use crate::sources::types::{Interruption, SourceDescriptor, SourceError};
use crate::transport::PayloadTransport;

/// Fetches and normalizes one source at a time, fail-soft: whatever goes
/// wrong for a feed (connection, status, body shape) stays contained to that
/// feed, and the other feeds keep flowing.
pub struct SourceFetcher {
    transport: Arc<dyn PayloadTransport>,
}

impl SourceFetcher {
    pub fn new(transport: Arc<dyn PayloadTransport>) -> Self {
        Self { transport }
    }

    /// Never fails: a broken source yields an empty batch plus one warn line
    /// and an error counter tick.
    pub async fn fetch_source(&self, source: &SourceDescriptor) -> Vec<Interruption> {
        match self.try_fetch(source).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(error = %e, source = source.name, "source failed, continuing without it");
                counter!("sources_fetch_errors_total", "source" => source.name).increment(1);
                Vec::new()
            }
        }
    }

    async fn try_fetch(
        &self,
        source: &SourceDescriptor,
    ) -> Result<Vec<Interruption>, SourceError> {
        let t0 = std::time::Instant::now();

        let body = self
            .transport
            .fetch_text(source.location)
            .await
            .map_err(|e| SourceError::Retrieval {
                feed: source.name.to_string(),
                detail: format!("{e:#}"),
            })?;

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| SourceError::MalformedPayload {
                feed: source.name.to_string(),
                detail: e.to_string(),
            })?;

        let raw_records = record_sequence(payload);
        if raw_records.is_empty() {
            tracing::debug!(source = source.name, "payload carried no records");
        }

        let batch: Vec<Interruption> = raw_records
            .iter()
            .filter_map(|raw| source.normalizer.apply(raw, source.name))
            .collect();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("sources_fetch_ms", "source" => source.name).record(ms);
        counter!("sources_records_total", "source" => source.name).increment(batch.len() as u64);

        Ok(batch)
    }
}

/// A feed publishes either a bare array or a GeoJSON-style envelope with a
/// `features` array; any other shape counts as "no records", not an error.
fn record_sequence(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut envelope) => match envelope.remove("features") {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
