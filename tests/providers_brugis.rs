// tests/providers_brugis.rs
use serde_json::Value;
use std::fs;

use verkeershinder_aggregator::sources::types::Normalizer;

const SOURCE: &str = "BRUGIS (Brussel)";

fn fixture_events() -> Vec<Value> {
    let body = fs::read_to_string("tests/fixtures/brugis_road_events.json")
        .expect("missing tests/fixtures/brugis_road_events.json");
    let envelope: Value = serde_json::from_str(&body).expect("fixture json");
    envelope["features"]
        .as_array()
        .expect("features array")
        .clone()
}

#[test]
fn brugis_fixture_normalizes_every_event() {
    let items: Vec<_> = fixture_events()
        .iter()
        .filter_map(|raw| Normalizer::Brugis.apply(raw, SOURCE))
        .collect();

    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.source_name == SOURCE));
}

#[test]
fn scalar_axes_are_reassembled_longitude_first() {
    let events = fixture_events();
    let item = Normalizer::Brugis.apply(&events[0], SOURCE).expect("first event");

    // upstream stores separate scalars; the unified shape is [lon, lat]
    assert_eq!(item.coords.as_deref(), Some(&[4.3688, 50.8466][..]));
    assert_eq!(item.van.as_deref(), Some("2025-03-02T06:00:00+01:00"));
    assert_eq!(item.tot.as_deref(), Some("2025-03-10T18:00:00+01:00"));
}

#[test]
fn description_prefers_long_then_short_then_sentinel() {
    let events = fixture_events();

    let with_long = Normalizer::Brugis.apply(&events[0], SOURCE).unwrap();
    assert_eq!(
        with_long.omschrijving,
        "Asfalteringswerken in de Wetstraat tussen nr. 10 en 40"
    );

    let with_short_only = Normalizer::Brugis.apply(&events[1], SOURCE).unwrap();
    assert_eq!(with_short_only.omschrijving, "Kraanwerken Louizalaan");

    let silent = Normalizer::Brugis.apply(&events[2], SOURCE).unwrap();
    assert_eq!(silent.omschrijving, "Geen details");
    assert_eq!(silent.aard, "Onbekend");
}

#[test]
fn missing_latitude_means_no_coordinates() {
    let events = fixture_events();
    let item = Normalizer::Brugis.apply(&events[2], SOURCE).unwrap();
    assert!(item.coords.is_none());
}
