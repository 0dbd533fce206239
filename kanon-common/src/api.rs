//! Shared API request types
//!
//! Wire bodies for the remote anonymization service, serialized with
//! the camelCase names the service expects. Flag defaults mirror the
//! service's own defaults: KPIs on, original data off, adjusted
//! attribute names on.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-LD anonymization request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLdRequest {
    /// URL of the externally hosted anonymization configuration
    pub configuration_url: String,

    /// The dataset to anonymize (a JSON-LD document)
    pub data: Value,

    /// Ask the service to compute KPIs alongside the result
    pub calculate_kpi: bool,

    /// Return original values next to the anonymized ones
    pub include_original_data: bool,

    /// Suffix anonymized attribute names so they stay distinguishable
    pub use_adjusted_attributes: bool,
}

impl JsonLdRequest {
    /// New request with the default flags.
    pub fn new(configuration_url: impl Into<String>, data: Value) -> Self {
        Self {
            configuration_url: configuration_url.into(),
            data,
            calculate_kpi: true,
            include_original_data: false,
            use_adjusted_attributes: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_flags(self.include_original_data, self.use_adjusted_attributes)
    }
}

/// Flat-JSON anonymization request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatJsonRequest {
    /// URL of the externally hosted anonymization configuration
    pub configuration_url: String,

    /// Attribute prefix the configuration expects
    pub prefix: String,

    /// The dataset records to anonymize
    pub data: Vec<Value>,

    /// Ask the service to compute KPIs alongside the result
    pub calculate_kpi: bool,

    /// Return original values next to the anonymized ones
    pub include_original_data: bool,

    /// Suffix anonymized attribute names so they stay distinguishable
    pub use_adjusted_attributes: bool,
}

impl FlatJsonRequest {
    /// New request with the default flags.
    pub fn new(
        configuration_url: impl Into<String>,
        prefix: impl Into<String>,
        data: Vec<Value>,
    ) -> Self {
        Self {
            configuration_url: configuration_url.into(),
            prefix: prefix.into(),
            data,
            calculate_kpi: true,
            include_original_data: false,
            use_adjusted_attributes: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_flags(self.include_original_data, self.use_adjusted_attributes)
    }
}

/// Original data may only be included while adjusted attribute names
/// are in use; the columns are indistinguishable otherwise.
fn validate_flags(include_original_data: bool, use_adjusted_attributes: bool) -> Result<()> {
    if include_original_data && !use_adjusted_attributes {
        return Err(Error::InvalidInput(
            "including original data requires adjusted attribute names".to_string(),
        ));
    }
    Ok(())
}
