// src/metrics.rs
use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder. Must happen before the first counter
/// tick, so the entrypoint calls this ahead of wiring the pipeline.
pub fn install_recorder() -> PrometheusHandle {
    // Default buckets; the series here are counters and one gauge anyway.
    PrometheusBuilder::new()
        .install_recorder()
        .expect("prometheus: install recorder")
}

/// Router exposing `/metrics` in the Prometheus exposition format.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let h = handle.clone();
            async move { h.render() }
        }),
    )
}
