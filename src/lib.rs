// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod config;
pub mod fetch;
pub mod metrics;
pub mod sources;
pub mod transport;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{AggregationError, Aggregator};
pub use crate::api::create_router;
pub use crate::sources::types::{Interruption, Normalizer, SourceDescriptor, SourceError};
