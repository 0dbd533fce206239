//! Integration tests for KPI extraction over realistic response payloads
//!
//! Fixtures under tests/fixtures/ model the two response shapes of the
//! anonymization service: a JSON-LD graph and a flat object with a
//! `kpis` map.

use kanon_common::kpi::{
    extract_flat_data, extract_flat_kpis, extract_graph_kpis, strip_kpi_entries,
};
use serde_json::Value;

fn graph_response() -> Value {
    serde_json::from_str(include_str!("fixtures/graph_response.json")).unwrap()
}

fn graph_two_kpis() -> Value {
    serde_json::from_str(include_str!("fixtures/graph_two_kpis.json")).unwrap()
}

fn flat_response() -> Value {
    serde_json::from_str(include_str!("fixtures/flat_response.json")).unwrap()
}

// ============================================================================
// Graph shape
// ============================================================================

#[test]
fn graph_extraction_resolves_referenced_attributes_in_order() {
    let kpis = extract_graph_kpis(&graph_response()).unwrap();

    assert_eq!(kpis.len(), 1);
    let person = &kpis[0];
    assert_eq!(person.object_type, "Person");
    assert_eq!(person.k_anonymity, 2);

    // Reference order, not graph order
    assert_eq!(person.attributes.len(), 2);
    assert_eq!(person.attributes[0].name, "oyd:name");
    assert_eq!(person.attributes[0].display_name, "Name");
    assert_eq!(person.attributes[0].anonymization_type, "masking");
    assert_eq!(person.attributes[0].nr_buckets_used, None);

    assert_eq!(person.attributes[1].name, "oyd:adresse");
    assert_eq!(person.attributes[1].display_name, "Adresse");
    assert_eq!(person.attributes[1].anonymization_type, "generalization");
    assert_eq!(person.attributes[1].nr_buckets_used, Some(3));
}

#[test]
fn graph_extraction_discovers_multiple_sets_in_graph_order() {
    let kpis = extract_graph_kpis(&graph_two_kpis()).unwrap();

    assert_eq!(kpis.len(), 2);
    assert_eq!(kpis[0].object_type, "Person");
    assert_eq!(kpis[0].k_anonymity, 4);
    assert_eq!(kpis[1].object_type, "Address");
    assert_eq!(kpis[1].k_anonymity, 7);
    assert_eq!(kpis[1].attributes.len(), 1);
    assert_eq!(kpis[1].attributes[0].anonymization_type, "masking");
}

#[test]
fn unresolved_reference_still_yields_an_attribute() {
    let kpis = extract_graph_kpis(&graph_two_kpis()).unwrap();

    let missing = &kpis[0].attributes[1];
    assert_eq!(missing.name, "oyd:missing");
    assert_eq!(missing.display_name, "Missing");
    assert_eq!(missing.anonymization_type, "unknown");
    assert_eq!(missing.nr_buckets_used, None);
}

#[test]
fn graph_without_indicators_extracts_to_absent() {
    let payload: Value = serde_json::from_str(
        r#"{"@graph": [{"@id": "person/1", "oyd:name": "***"}]}"#,
    )
    .unwrap();
    assert_eq!(extract_graph_kpis(&payload), None);
}

#[test]
fn extraction_does_not_mutate_the_payload() {
    let payload = graph_response();
    let before = payload.clone();
    let _ = extract_graph_kpis(&payload);
    assert_eq!(payload, before);
}

// ============================================================================
// Stripping
// ============================================================================

#[test]
fn strip_removes_indicator_and_metadata_nodes_only() {
    let stripped = strip_kpi_entries(&graph_response());
    let graph = stripped["@graph"].as_array().unwrap();

    // Only the two genuine data nodes survive
    assert_eq!(graph.len(), 2);
    assert_eq!(graph[0]["@id"], "person/1");
    assert_eq!(graph[1]["@id"], "person/2");

    // Context outside the graph is untouched
    assert_eq!(stripped["@context"], graph_response()["@context"]);
}

#[test]
fn strip_is_idempotent() {
    let once = strip_kpi_entries(&graph_response());
    let twice = strip_kpi_entries(&once);
    assert_eq!(once, twice);
}

#[test]
fn stripped_payload_extracts_to_absent() {
    let stripped = strip_kpi_entries(&graph_two_kpis());
    assert_eq!(extract_graph_kpis(&stripped), None);
}

// ============================================================================
// Flat shape
// ============================================================================

#[test]
fn flat_extraction_reads_attributes_and_drops_empty_entries() {
    let kpis = extract_flat_kpis(&flat_response()).unwrap();

    // kpiAddress has k-anonymity 0 and no attributes: dropped as noise
    assert_eq!(kpis.len(), 1);
    let person = &kpis[0];
    assert_eq!(person.object_type, "Person");
    assert_eq!(person.k_anonymity, 3);
    assert_eq!(person.attributes.len(), 2);
    assert_eq!(person.attributes[0].name, "name");
    assert_eq!(person.attributes[0].anonymization_type, "masking");
    assert_eq!(person.attributes[1].name, "age");
    assert_eq!(person.attributes[1].nr_buckets_used, Some(4));
}

#[test]
fn flat_data_projection_returns_the_records() {
    let data = extract_flat_data(&flat_response());
    let records = data.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name_anon"], "***");
}

#[test]
fn flat_payload_without_kpis_extracts_to_absent() {
    let payload: Value = serde_json::from_str(r#"{"data": [{"a": 1}]}"#).unwrap();
    assert_eq!(extract_flat_kpis(&payload), None);
}
