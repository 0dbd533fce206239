//! KPI extraction for flat-JSON responses
//!
//! Flat responses carry their indicators in a top-level `kpis` map
//! keyed `kpi{ObjectType}`. Each entry holds the literal `k-Anonymity`
//! field plus one nested mapping per anonymized attribute.

use serde_json::{Map, Value};
use tracing::debug;

use super::literal::parse_count;
use super::{display_name, AttributeKpi, KpiSet, UNKNOWN_METHOD, UNKNOWN_OBJECT_TYPE};

const KPIS_KEY: &str = "kpis";
const DATA_KEY: &str = "data";

/// Hyphenated and case-sensitive on the wire
const K_ANONYMITY_KEY: &str = "k-Anonymity";

/// `kpis` map keys strip this prefix to give the object type
const KPI_KEY_PREFIX: &str = "kpi";

/// Accepted method-field aliases, first present wins
const METHOD_KEYS: [&str; 2] = ["anonymization", "anonymizationType"];

/// Accepted bucket-count aliases, first present wins
const BUCKET_KEYS: [&str; 2] = ["nrBuckets", "nrBucketsUsed"];

/// Extract all indicator sets from a flat-JSON response.
///
/// Returns `None` when the payload has no `kpis` mapping or every
/// entry is dropped as noise (k-anonymity 0 and no attributes).
/// Iteration follows the mapping's insertion order.
pub fn extract_flat_kpis(payload: &Value) -> Option<Vec<KpiSet>> {
    let kpis = payload.get(KPIS_KEY)?.as_object()?;
    if kpis.is_empty() {
        return None;
    }
    debug!(count = kpis.len(), "Found indicator entries in flat response");

    let mut results = Vec::new();
    for (key, body) in kpis {
        let body = match body.as_object() {
            Some(body) => body,
            None => continue,
        };

        let object_type = object_type_from_key(key);
        let k_anonymity = body.get(K_ANONYMITY_KEY).and_then(flat_count).unwrap_or(0);
        let attributes = attributes_from_body(body);

        // Entries with nothing to report are noise, not data
        if k_anonymity != 0 || !attributes.is_empty() {
            results.push(KpiSet {
                object_type,
                k_anonymity,
                attributes,
            });
        }
    }

    if results.is_empty() {
        None
    } else {
        Some(results)
    }
}

/// Project the data records out of a flat response.
///
/// Returns the `data` array when present, an already-bare array as-is,
/// and any other payload unchanged.
pub fn extract_flat_data(payload: &Value) -> Value {
    if let Some(data) = payload.get(DATA_KEY) {
        if data.is_array() {
            return data.clone();
        }
    }
    payload.clone()
}

/// `kpiPerson` -> `Person`
fn object_type_from_key(key: &str) -> String {
    match key.strip_prefix(KPI_KEY_PREFIX) {
        Some("") | None => UNKNOWN_OBJECT_TYPE.to_string(),
        Some(object_type) => object_type.to_string(),
    }
}

/// Every mapping-valued key other than `k-Anonymity` is one attribute.
fn attributes_from_body(body: &Map<String, Value>) -> Vec<AttributeKpi> {
    let mut attributes = Vec::new();
    for (name, value) in body {
        if name == K_ANONYMITY_KEY {
            continue;
        }
        let fields = match value.as_object() {
            Some(fields) => fields,
            None => continue,
        };

        let anonymization_type = first_of(fields, &METHOD_KEYS)
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_METHOD)
            .to_string();
        let nr_buckets_used = first_of(fields, &BUCKET_KEYS).and_then(flat_count);

        attributes.push(AttributeKpi {
            name: name.clone(),
            display_name: display_name(name),
            anonymization_type,
            nr_buckets_used,
        });
    }
    attributes
}

fn first_of<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

/// Flat fields accept a bare number or a numeric string, nothing else.
fn flat_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or(-1.0);
            if (0.0..=u32::MAX as f64).contains(&n) {
                Some(n.trunc() as u32)
            } else {
                None
            }
        }
        Value::String(s) => parse_count(s),
        _ => None,
    }
}
