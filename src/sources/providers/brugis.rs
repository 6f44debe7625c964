// src/sources/providers/brugis.rs
use serde::Deserialize;
use serde_json::Value;

use crate::sources::providers::{GEEN_DETAILS, ONBEKEND};
use crate::sources::types::Interruption;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoadEvent {
    id: Option<Value>,
    long_description: Option<Translated>,
    short_description: Option<Translated>,
    sub_category: Option<Translated>,
    start_time: Option<String>,
    end_time: Option<String>,
    location: Option<Location>,
}

/// BRUGIS texts come as language maps; we read the Dutch variant.
#[derive(Debug, Deserialize)]
struct Translated {
    nl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Location {
    longitude: Option<f64>,
    latitude: Option<f64>,
}

/// Map one BRUGIS road event to the unified shape.
///
/// Description precedence: long Dutch text, then short Dutch text, then the
/// sentinel. The feed exposes longitude/latitude as separate scalars; both
/// must be present to form the canonical `[longitude, latitude]` pair.
pub fn normalize(raw: &Value, source_name: &str) -> Option<Interruption> {
    let event = RoadEvent::deserialize(raw).ok()?;

    let omschrijving = event
        .long_description
        .and_then(|d| d.nl)
        .or_else(|| event.short_description.and_then(|d| d.nl))
        .unwrap_or_else(|| GEEN_DETAILS.to_string());

    let coords = event
        .location
        .and_then(|loc| match (loc.longitude, loc.latitude) {
            (Some(lon), Some(lat)) => Some(vec![lon, lat]),
            _ => None,
        });

    Some(Interruption {
        id: event.id.unwrap_or(Value::Null),
        omschrijving,
        aard: event
            .sub_category
            .and_then(|c| c.nl)
            .unwrap_or_else(|| ONBEKEND.to_string()),
        van: event.start_time,
        tot: event.end_time,
        coords,
        source_name: source_name.to_string(),
    })
}
