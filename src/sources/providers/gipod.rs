// src/sources/providers/gipod.rs
use serde::Deserialize;
use serde_json::Value;

use crate::sources::providers::{GEEN_DETAILS, ONBEKEND};
use crate::sources::types::Interruption;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Inname {
    gipod_id: Option<Value>,
    omschrijving: Option<String>,
    gipod_type: Option<GipodType>,
    start_date_time: Option<String>,
    eind_date_time: Option<String>,
    geometrie: Option<Geometrie>,
}

#[derive(Debug, Deserialize)]
struct GipodType {
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometrie {
    coordinates: Option<Value>,
}

/// Map one GIPOD "inname" to the unified shape.
///
/// GIPOD already publishes point geometry as `[longitude, latitude]`;
/// non-point geometry (polygons) has no usable coordinate pair.
pub fn normalize(raw: &Value, source_name: &str) -> Option<Interruption> {
    let inname = Inname::deserialize(raw).ok()?;

    Some(Interruption {
        id: inname.gipod_id.unwrap_or(Value::Null),
        omschrijving: inname
            .omschrijving
            .unwrap_or_else(|| GEEN_DETAILS.to_string()),
        aard: inname
            .gipod_type
            .and_then(|t| t.label)
            .unwrap_or_else(|| ONBEKEND.to_string()),
        van: inname.start_date_time,
        tot: inname.eind_date_time,
        coords: inname
            .geometrie
            .and_then(|g| g.coordinates)
            .and_then(coordinate_array),
        source_name: source_name.to_string(),
    })
}

/// A flat numeric array passes through as-is (length is validated at the
/// dedup stage); nested polygon/ring arrays do not.
fn coordinate_array(value: Value) -> Option<Vec<f64>> {
    serde_json::from_value(value).ok()
}
