use crate::catalog::{CatalogSnapshot, VendorSummary};
use crate::query::engine::rank_vendors;
use serde::{Deserialize, Serialize};

/// Inbound lookup request.
///
/// Both fields are optional; `null` and absence mean "no constraint".
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
}

/// Outbound lookup result; `count` always equals `top_vendors.len()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub top_vendors: Vec<VendorSummary>,
    pub count: usize,
}

impl VendorQuery {
    pub fn new(category: Option<&str>, capabilities: Vec<String>) -> Self {
        Self {
            software_category: category.map(str::to_string),
            capabilities: Some(capabilities),
        }
    }

    /// Category filter, or `None` when it would not constrain anything.
    pub fn category(&self) -> Option<&str> {
        self.software_category
            .as_deref()
            .filter(|category| !category.is_empty())
    }

    pub fn capabilities(&self) -> &[String] {
        self.capabilities.as_deref().unwrap_or(&[])
    }

    /// Evaluate against a captured snapshot.
    pub fn run(&self, snapshot: &CatalogSnapshot) -> QueryResult {
        QueryResult::new(rank_vendors(snapshot, self.category(), self.capabilities()))
    }
}

impl QueryResult {
    pub fn new(top_vendors: Vec<VendorSummary>) -> Self {
        Self {
            count: top_vendors.len(),
            top_vendors,
        }
    }
}
