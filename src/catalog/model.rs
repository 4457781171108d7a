//! Vendor rows as held by a loaded catalog.
//!
//! A `VendorRecord` carries the four columns the query contract depends on
//! plus whatever other columns the source happened to have. Only the four
//! contract fields ever leave the process; see `VendorSummary`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized names of the columns every catalog source must provide.
pub const REQUIRED_COLUMNS: [&str; 4] =
    ["product_name", "main_category", "parsed_features", "rating"];

/// One row of the vendor catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct VendorRecord {
    pub product_name: String,
    /// `None` when the source cell was blank.
    pub main_category: Option<String>,
    /// Free-text capability blob; `None` when the source cell was blank.
    pub parsed_features: Option<String>,
    /// Always finite once a record is part of a snapshot.
    pub rating: f64,
    /// Non-contract columns keyed by normalized name.
    pub extras: BTreeMap<String, String>,
}

/// Projection of a record onto the outbound result contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VendorSummary {
    pub product_name: String,
    pub main_category: Option<String>,
    pub parsed_features: Option<String>,
    pub rating: f64,
}

impl VendorRecord {
    /// Build a record with no extra columns.
    pub fn new(
        product_name: impl Into<String>,
        main_category: Option<&str>,
        parsed_features: Option<&str>,
        rating: f64,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            main_category: main_category.map(str::to_string),
            parsed_features: parsed_features.map(str::to_string),
            rating,
            extras: BTreeMap::new(),
        }
    }

    /// Drop everything outside the result contract.
    pub fn summary(&self) -> VendorSummary {
        VendorSummary {
            product_name: self.product_name.clone(),
            main_category: self.main_category.clone(),
            parsed_features: self.parsed_features.clone(),
            rating: self.rating,
        }
    }
}

/// Normalize a source column header ("Main Category" -> "main_category").
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Blank cells are treated as absent.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
