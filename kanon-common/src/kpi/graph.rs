//! KPI extraction and stripping for JSON-LD graph responses
//!
//! Indicator-set nodes live in the `@graph` array next to the data
//! nodes, identified by the `soya-context/kpi{ObjectType}` naming
//! convention. Each indicator node references its attribute nodes by
//! `@id` through `hasAttribute`.

use serde_json::Value;
use tracing::debug;

use super::literal::Literal;
use super::{display_name, AttributeKpi, KpiSet, UNKNOWN_METHOD, UNKNOWN_OBJECT_TYPE};

/// Identity substring marking an indicator-set node
const KPI_MARKER: &str = "ns.ownyourdata.eu/ns/soya-context/kpi";

/// Identity segment preceding the object type
const TYPE_SEGMENT: &str = "/kpi";

const GRAPH_KEY: &str = "@graph";
const ID_KEY: &str = "@id";

const K_ANONYMITY_KEY: &str = "http://ns.ownyourdata.eu/ns/soya-context/kanonymity";
const HAS_ATTRIBUTE_KEY: &str = "http://ns.ownyourdata.eu/ns/soya-context/hasAttribute";
const ANONYMIZATION_TYPE_KEY: &str = "http://ns.ownyourdata.eu/ns/soya-context/anonymizationTyp";
const NR_BUCKETS_KEY: &str = "http://ns.ownyourdata.eu/ns/soya-context/nrBucketsUsed";

/// Extract all indicator sets from a JSON-LD graph response.
///
/// Returns `None` when the payload has no `@graph` array or the graph
/// contains no indicator nodes; this is the "nothing to extract" case,
/// not a fault. Discovery order follows the graph's node order.
pub fn extract_graph_kpis(payload: &Value) -> Option<Vec<KpiSet>> {
    let graph = payload.get(GRAPH_KEY)?.as_array()?;

    let kpi_nodes: Vec<&Value> = graph
        .iter()
        .filter(|node| node_id(node).is_some_and(|id| id.contains(KPI_MARKER)))
        .collect();

    if kpi_nodes.is_empty() {
        return None;
    }
    debug!(count = kpi_nodes.len(), "Found indicator nodes in graph");

    let mut results = Vec::with_capacity(kpi_nodes.len());
    for node in kpi_nodes {
        let object_type = object_type_from_id(node_id(node).unwrap_or_default());
        let k_anonymity = Literal::decode(node.get(K_ANONYMITY_KEY))
            .as_count()
            .unwrap_or(0);
        let attributes = match node.get(HAS_ATTRIBUTE_KEY) {
            Some(refs) => resolve_attribute_refs(refs, graph),
            None => Vec::new(),
        };

        results.push(KpiSet {
            object_type,
            k_anonymity,
            attributes,
        });
    }

    Some(results)
}

/// Remove indicator metadata from a graph payload, leaving only data
/// nodes.
///
/// Drops nodes whose identity carries the indicator marker and nodes
/// carrying attribute metadata fields. A payload without a `@graph`
/// array is returned unchanged. Applying this twice is a no-op.
pub fn strip_kpi_entries(payload: &Value) -> Value {
    let graph = match payload.get(GRAPH_KEY).and_then(Value::as_array) {
        Some(graph) => graph,
        None => return payload.clone(),
    };

    let filtered: Vec<Value> = graph
        .iter()
        .filter(|node| !is_indicator_node(node))
        .cloned()
        .collect();

    let mut stripped = payload.clone();
    if let Some(map) = stripped.as_object_mut() {
        map.insert(GRAPH_KEY.to_string(), Value::Array(filtered));
    }
    stripped
}

fn is_indicator_node(node: &Value) -> bool {
    if node_id(node).is_some_and(|id| id.contains(KPI_MARKER)) {
        return true;
    }
    node.get(ANONYMIZATION_TYPE_KEY).is_some() || node.get(NR_BUCKETS_KEY).is_some()
}

fn node_id(node: &Value) -> Option<&str> {
    node.get(ID_KEY)?.as_str()
}

/// `http://.../soya-context/kpiPerson` -> `Person`
fn object_type_from_id(id: &str) -> String {
    match id.rfind(TYPE_SEGMENT) {
        Some(idx) => {
            let object_type = &id[idx + TYPE_SEGMENT.len()..];
            if object_type.is_empty() {
                UNKNOWN_OBJECT_TYPE.to_string()
            } else {
                object_type.to_string()
            }
        }
        None => UNKNOWN_OBJECT_TYPE.to_string(),
    }
}

/// `hasAttribute` holds a single reference or a sequence of references.
fn resolve_attribute_refs(refs: &Value, graph: &[Value]) -> Vec<AttributeKpi> {
    let refs: Vec<&Value> = match refs {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    let mut attributes = Vec::with_capacity(refs.len());
    for attr_ref in refs {
        let attr_id = match reference_id(attr_ref) {
            Some(id) => id,
            // Neither an identity string nor a mapping with @id
            None => continue,
        };

        match graph.iter().find(|node| node_id(node) == Some(attr_id)) {
            Some(node) => attributes.push(attribute_from_node(node, attr_id)),
            None => {
                // Reference resolves outside the graph: keep the entry,
                // method unknown
                debug!(attr_id = %attr_id, "Attribute reference not found in graph");
                attributes.push(AttributeKpi {
                    name: attr_id.to_string(),
                    display_name: display_name(attr_id),
                    anonymization_type: UNKNOWN_METHOD.to_string(),
                    nr_buckets_used: None,
                });
            }
        }
    }
    attributes
}

/// A reference is either a bare identity string or `{"@id": "..."}`.
fn reference_id(attr_ref: &Value) -> Option<&str> {
    match attr_ref {
        Value::String(id) => Some(id),
        Value::Object(map) => map.get(ID_KEY)?.as_str(),
        _ => None,
    }
}

fn attribute_from_node(node: &Value, attr_id: &str) -> AttributeKpi {
    let anonymization_type = Literal::decode(node.get(ANONYMIZATION_TYPE_KEY))
        .as_text()
        .unwrap_or(UNKNOWN_METHOD)
        .to_string();
    let nr_buckets_used = Literal::decode(node.get(NR_BUCKETS_KEY)).as_count();

    AttributeKpi {
        name: attr_id.to_string(),
        display_name: display_name(attr_id),
        anonymization_type,
        nr_buckets_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_type_from_id() {
        assert_eq!(
            object_type_from_id("http://ns.ownyourdata.eu/ns/soya-context/kpiPerson"),
            "Person"
        );
        assert_eq!(
            object_type_from_id("http://ns.ownyourdata.eu/ns/soya-context/kpi"),
            "Unknown"
        );
        assert_eq!(object_type_from_id("http://example.org/other"), "Unknown");
        assert_eq!(object_type_from_id(""), "Unknown");
    }

    #[test]
    fn test_reference_id_shapes() {
        assert_eq!(reference_id(&json!("oyd:name")), Some("oyd:name"));
        assert_eq!(reference_id(&json!({"@id": "oyd:name"})), Some("oyd:name"));
        assert_eq!(reference_id(&json!({"other": "oyd:name"})), None);
        assert_eq!(reference_id(&json!(42)), None);
    }

    #[test]
    fn test_extract_without_graph_is_absent() {
        assert_eq!(extract_graph_kpis(&json!({})), None);
        assert_eq!(extract_graph_kpis(&json!({"@graph": "not an array"})), None);
        assert_eq!(extract_graph_kpis(&json!([1, 2, 3])), None);
    }

    #[test]
    fn test_extract_without_indicator_nodes_is_absent() {
        let payload = json!({
            "@graph": [
                {"@id": "person/1", "oyd:name": "***"},
                {"@id": "person/2", "oyd:name": "***"}
            ]
        });
        assert_eq!(extract_graph_kpis(&payload), None);
    }

    #[test]
    fn test_single_attribute_reference_is_normalized() {
        // hasAttribute as a single object rather than an array
        let payload = json!({
            "@graph": [
                {
                    "@id": "http://ns.ownyourdata.eu/ns/soya-context/kpiPerson",
                    "http://ns.ownyourdata.eu/ns/soya-context/kanonymity": 2,
                    "http://ns.ownyourdata.eu/ns/soya-context/hasAttribute": {"@id": "oyd:name"}
                },
                {
                    "@id": "oyd:name",
                    "http://ns.ownyourdata.eu/ns/soya-context/anonymizationTyp": "masking"
                }
            ]
        });

        let kpis = extract_graph_kpis(&payload).unwrap();
        assert_eq!(kpis.len(), 1);
        assert_eq!(kpis[0].attributes.len(), 1);
        assert_eq!(kpis[0].attributes[0].anonymization_type, "masking");
        assert_eq!(kpis[0].attributes[0].nr_buckets_used, None);
    }

    #[test]
    fn test_k_anonymity_field_shapes() {
        for (k_value, expected) in [
            (json!(3), 3),
            (json!("3"), 3),
            (json!({"@value": "3"}), 3),
            (json!({"@value": 3}), 3),
            (json!("not a number"), 0),
            (json!(null), 0),
        ] {
            let payload = json!({
                "@graph": [{
                    "@id": "http://ns.ownyourdata.eu/ns/soya-context/kpiPerson",
                    "http://ns.ownyourdata.eu/ns/soya-context/kanonymity": k_value
                }]
            });
            let kpis = extract_graph_kpis(&payload).unwrap();
            assert_eq!(kpis[0].k_anonymity, expected);
        }
    }

    #[test]
    fn test_missing_k_anonymity_is_zero() {
        let payload = json!({
            "@graph": [{"@id": "http://ns.ownyourdata.eu/ns/soya-context/kpiPerson"}]
        });
        let kpis = extract_graph_kpis(&payload).unwrap();
        assert_eq!(kpis[0].k_anonymity, 0);
        assert!(kpis[0].attributes.is_empty());
    }

    #[test]
    fn test_strip_without_graph_returns_payload_unchanged() {
        let payload = json!({"data": [1, 2, 3]});
        assert_eq!(strip_kpi_entries(&payload), payload);
    }

    #[test]
    fn test_strip_does_not_mutate_input() {
        let payload = json!({
            "@graph": [
                {"@id": "http://ns.ownyourdata.eu/ns/soya-context/kpiPerson"},
                {"@id": "person/1"}
            ]
        });
        let before = payload.clone();
        let _ = strip_kpi_entries(&payload);
        assert_eq!(payload, before);
    }
}
