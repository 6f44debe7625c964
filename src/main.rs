//! Road-Interruption Aggregation Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the feed registry, outbound transport,
//! and routes.
//!
//! See `README.md` for quickstart.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use verkeershinder_aggregator::aggregate::Aggregator;
use verkeershinder_aggregator::api::{self, AppState};
use verkeershinder_aggregator::config;
use verkeershinder_aggregator::fetch::SourceFetcher;
use verkeershinder_aggregator::metrics;
use verkeershinder_aggregator::sources;
use verkeershinder_aggregator::transport::HttpTransport;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - AGGREGATOR_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("AGGREGATOR_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("verkeershinder_aggregator=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables TRANSPORT_CONFIG_PATH / RELAY_URL from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let metrics_handle = metrics::install_recorder();

    // --- Wire the aggregation pipeline ---
    let cfg = config::load_default().expect("Failed to load transport config");
    let transport = HttpTransport::from_config(&cfg).expect("Failed to build outbound transport");
    let fetcher = SourceFetcher::new(Arc::new(transport));
    let aggregator = Arc::new(Aggregator::new(sources::registry(), fetcher));

    let state = AppState { aggregator };
    let router = api::create_router(state).merge(metrics::router(metrics_handle));

    Ok(router.into())
}
