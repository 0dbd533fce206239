//! Text rendering of the KPI report
//!
//! One block per object type: the k-anonymity value with its severity
//! band, then the per-attribute anonymization metadata.

use kanon_common::kpi::KpiSet;
use kanon_common::Severity;

/// Render the indicator-set sequence as a plain-text report.
pub fn render_kpi_report(kpi_sets: &[KpiSet]) -> String {
    let mut out = String::new();
    for set in kpi_sets {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("Object type: {}\n", set.object_type));

        let severity = Severity::classify(set.k_anonymity);
        out.push_str(&format!(
            "  k-Anonymity: {} [{}]\n",
            set.k_anonymity,
            severity.label()
        ));

        if !set.attributes.is_empty() {
            out.push_str("  Attributes:\n");
            for attr in &set.attributes {
                match attr.nr_buckets_used {
                    Some(buckets) => out.push_str(&format!(
                        "    {}: {} ({} buckets)\n",
                        attr.display_name,
                        format_method(&attr.anonymization_type),
                        buckets
                    )),
                    None => out.push_str(&format!(
                        "    {}: {}\n",
                        attr.display_name,
                        format_method(&attr.anonymization_type)
                    )),
                }
            }
        }
    }
    out
}

/// Format a method label for display: first letter uppercased, the
/// rest lowercased. An empty label reads "Unknown".
pub fn format_method(method: &str) -> String {
    let mut chars = method.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => "Unknown".to_string(),
    }
}
