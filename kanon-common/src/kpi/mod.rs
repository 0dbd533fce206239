//! KPI extraction from anonymization service responses
//!
//! The anonymization service attaches privacy-quality indicators to its
//! responses: one k-anonymity value per anonymized object type, plus
//! per-attribute anonymization metadata (method and, for
//! generalization-style methods, the bucket count used). Responses come
//! in two shapes:
//!
//! - **JSON-LD graph**: entities are nodes of an `@graph` array,
//!   cross-referenced by `@id`. Indicator nodes are recognized by the
//!   `soya-context/kpi` marker in their identity.
//! - **Flat JSON**: a plain object with a `data` array and a top-level
//!   `kpis` map keyed by object type.
//!
//! This module normalizes both shapes into an ordered [`KpiSet`]
//! sequence, and provides the inverse projection that strips indicator
//! entries back out of a graph payload (used before handing a response
//! to the canonicalization service, which should not see indicator
//! metadata).
//!
//! Extraction is total and side-effect-free: any input shape produces
//! either a summary or `None` ("nothing to extract"), never an error.

mod flat;
mod graph;
mod literal;

pub use flat::{extract_flat_data, extract_flat_kpis};
pub use graph::{extract_graph_kpis, strip_kpi_entries};

use serde::{Deserialize, Serialize};

/// Object type used when an indicator identity carries no usable type
pub(crate) const UNKNOWN_OBJECT_TYPE: &str = "Unknown";

/// Method label used when an attribute carries no anonymization type
pub(crate) const UNKNOWN_METHOD: &str = "unknown";

/// Anonymization metadata for a single data attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeKpi {
    /// Raw attribute identifier (possibly namespaced or URL-shaped)
    pub name: String,

    /// Human-readable name derived from `name`
    pub display_name: String,

    /// Anonymization method label (e.g. "masking", "generalization")
    pub anonymization_type: String,

    /// Bucket count, present for generalization-style methods only
    pub nr_buckets_used: Option<u32>,
}

/// Indicator set for one anonymized object type
///
/// One `KpiSet` per object type found in a response, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSet {
    /// Object type the indicators describe (e.g. "Person")
    pub object_type: String,

    /// Minimum group size sharing identical quasi-identifying values
    pub k_anonymity: u32,

    /// Per-attribute anonymization metadata, in reference order
    pub attributes: Vec<AttributeKpi>,
}

/// Derive a display-friendly name from a raw attribute identifier.
///
/// Takes the segment after the last namespace separator (`:`), then
/// after the last path separator (`/`), and uppercases the first
/// character. A separator with nothing behind it leaves the identifier
/// whole.
///
/// # Examples
///
/// ```
/// use kanon_common::kpi::display_name;
///
/// assert_eq!(display_name("oyd:adresse"), "Adresse");
/// assert_eq!(display_name("http://x/y/name"), "Name");
/// assert_eq!(display_name("age"), "Age");
/// ```
pub fn display_name(identifier: &str) -> String {
    let mut name = identifier;
    if let Some(idx) = name.rfind(':') {
        let tail = &name[idx + 1..];
        if !tail.is_empty() {
            name = tail;
        }
    }
    if let Some(idx) = name.rfind('/') {
        let tail = &name[idx + 1..];
        if !tail.is_empty() {
            name = tail;
        }
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
