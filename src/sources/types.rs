// src/sources/types.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::sources::providers::{brugis, gipod};

/// One normalized road interruption, the only record shape clients see.
///
/// `van`/`tot` keep the upstream's native string representation; they are
/// carried through for display, never parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interruption {
    /// Upstream-assigned identifier; numeric for some feeds, a string for
    /// others, so it is carried opaquely.
    pub id: Value,
    pub omschrijving: String,
    pub aard: String,
    pub van: Option<String>,
    pub tot: Option<String>,
    /// Canonical order is `[longitude, latitude]`.
    pub coords: Option<Vec<f64>>,
    #[serde(rename = "sourceName")]
    pub source_name: String,
}

impl Interruption {
    /// The coordinate pair when the record is well-formed for deduplication:
    /// exactly one longitude and one latitude.
    pub fn coordinate_pair(&self) -> Option<(f64, f64)> {
        match self.coords.as_deref() {
            Some(&[lon, lat]) => Some((lon, lat)),
            _ => None,
        }
    }
}

/// Closed set of per-feed normalizers, dispatched through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    Gipod,
    Brugis,
}

impl Normalizer {
    /// Map one raw upstream record to the unified shape. Pure, no I/O.
    /// Elements that are not usable at all (not even an object) yield `None`
    /// and are skipped; missing fields inside an object resolve via the
    /// per-source fallback chain instead.
    pub fn apply(&self, raw: &Value, source_name: &str) -> Option<Interruption> {
        match self {
            Normalizer::Gipod => gipod::normalize(raw, source_name),
            Normalizer::Brugis => brugis::normalize(raw, source_name),
        }
    }
}

/// Static metadata for one upstream feed. Built once at startup, shared
/// read-only; registering a new feed is appending one descriptor.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    /// Display label, unique per feed; stamped into every record it yields.
    pub name: &'static str,
    /// Retrieval target. The transport may relay/rewrap it; the pipeline
    /// never looks inside.
    pub location: &'static str,
    pub normalizer: Normalizer,
}

/// Failures that stay contained inside the fetch of a single source. They
/// surface as one warn line and an empty batch, never to the caller.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection failure or non-success upstream status.
    #[error("retrieval from {feed} failed: {detail}")]
    Retrieval { feed: String, detail: String },

    /// Body arrived but is not parseable as JSON.
    #[error("payload from {feed} is malformed: {detail}")]
    MalformedPayload { feed: String, detail: String },
}
