//! Filter, rank, truncate.
//!
//! Matching is literal, case-insensitive substring containment. Category and
//! capability filters are conjunctive; survivors are ordered by rating,
//! highest first, with ties left in catalog order.

use crate::catalog::{CatalogSnapshot, VendorRecord, VendorSummary};
use std::cmp::Ordering;

/// Upper bound on the number of vendors a query returns.
pub const MAX_RESULTS: usize = 10;

/// Run the vendor lookup against one snapshot.
///
/// An absent or empty `category` applies no category filter. Every entry in
/// `capabilities` must occur in a record's `parsed_features`. Records with
/// no value in a filtered column never match.
pub fn rank_vendors(
    snapshot: &CatalogSnapshot,
    category: Option<&str>,
    capabilities: &[String],
) -> Vec<VendorSummary> {
    let category = category.filter(|c| !c.is_empty()).map(Needle::new);
    let needles: Vec<Needle> = capabilities.iter().map(|c| Needle::new(c)).collect();

    let mut matches: Vec<&VendorRecord> = snapshot
        .records()
        .iter()
        .filter(|record| {
            category
                .as_ref()
                .is_none_or(|needle| needle.found_in(record.main_category.as_deref()))
        })
        .filter(|record| {
            needles
                .iter()
                .all(|needle| needle.found_in(record.parsed_features.as_deref()))
        })
        .collect();

    // sort_by is stable: numerically equal ratings (0.0 and -0.0 included)
    // keep catalog order. Ratings in a snapshot are finite.
    matches.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(Ordering::Equal)
    });
    matches.truncate(MAX_RESULTS);
    matches.into_iter().map(VendorRecord::summary).collect()
}

/// A search string lower-cased once per query.
struct Needle {
    lowered: String,
}

impl Needle {
    fn new(raw: &str) -> Self {
        Self {
            lowered: raw.to_lowercase(),
        }
    }

    fn found_in(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|text| text.to_lowercase().contains(&self.lowered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: &str,
        category: Option<&str>,
        features: Option<&str>,
        rating: f64,
    ) -> VendorRecord {
        VendorRecord::new(name, category, features, rating)
    }

    fn names(results: &[VendorSummary]) -> Vec<&str> {
        results.iter().map(|r| r.product_name.as_str()).collect()
    }

    fn caps(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn crm_heavy_catalog() -> CatalogSnapshot {
        let crm_ratings = [9.1, 8.7, 8.7, 8.5, 8.2, 7.9, 7.7, 7.5, 7.1, 6.8, 6.5, 6.0];
        let mut records: Vec<VendorRecord> = crm_ratings
            .iter()
            .enumerate()
            .map(|(idx, rating)| {
                record(
                    &format!("crm-{idx}"),
                    Some("CRM Software"),
                    Some("Contact Management"),
                    *rating,
                )
            })
            .collect();
        for idx in 0..5 {
            records.push(record(
                &format!("other-{idx}"),
                Some("Accounting Software"),
                Some("Invoicing"),
                9.9,
            ));
        }
        CatalogSnapshot::from_records(records)
    }

    #[test]
    fn category_filter_ranks_and_truncates() {
        let results = rank_vendors(&crm_heavy_catalog(), Some("CRM"), &[]);

        assert_eq!(results.len(), MAX_RESULTS);
        assert!(
            results
                .iter()
                .all(|r| r.main_category.as_deref() == Some("CRM Software"))
        );
        assert!(results.windows(2).all(|pair| pair[0].rating >= pair[1].rating));
        assert_eq!(results[0].rating, 9.1);
    }

    #[test]
    fn equal_ratings_keep_catalog_order() {
        let results = rank_vendors(&crm_heavy_catalog(), Some("crm"), &[]);
        assert_eq!(&names(&results)[1..3], &["crm-1", "crm-2"]);
    }

    #[test]
    fn signed_zero_ratings_tie_in_catalog_order() {
        let snapshot = CatalogSnapshot::from_records(vec![
            record("negative-zero", Some("CRM"), None, -0.0),
            record("zero", Some("CRM"), None, 0.0),
            record("rated", Some("CRM"), None, 1.0),
        ]);
        let results = rank_vendors(&snapshot, None, &[]);
        assert_eq!(names(&results), vec!["rated", "negative-zero", "zero"]);
    }

    #[test]
    fn capability_matching_ignores_case() {
        let snapshot = CatalogSnapshot::from_records(vec![
            record("a", Some("CRM"), Some("Custom Objects, Reports"), 5.0),
            record("b", Some("ERP"), Some("supports CUSTOM OBJECTS"), 7.0),
            record("c", Some("CRM"), Some("custom objects"), 6.0),
            record("d", Some("CRM"), Some("Custom fields"), 9.0),
            record("e", Some("CRM"), None, 9.5),
        ]);
        let results = rank_vendors(&snapshot, None, &caps(&["custom objects"]));
        assert_eq!(names(&results), vec!["b", "c", "a"]);
    }

    #[test]
    fn capabilities_are_conjunctive_and_order_independent() {
        let snapshot = CatalogSnapshot::from_records(vec![
            record("both", Some("CRM"), Some("API access; Custom Objects"), 5.0),
            record("api-only", Some("CRM"), Some("API access"), 8.0),
            record("objects-only", Some("CRM"), Some("custom objects"), 9.0),
        ]);
        let forward = rank_vendors(&snapshot, None, &caps(&["api", "custom objects"]));
        let backward = rank_vendors(&snapshot, None, &caps(&["custom objects", "api"]));
        assert_eq!(names(&forward), vec!["both"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn combined_filters_return_the_intersection() {
        let snapshot = CatalogSnapshot::from_records(vec![
            record("crm-objects", Some("CRM Software"), Some("Custom Objects"), 7.0),
            record("crm-plain", Some("CRM Software"), Some("Email"), 9.0),
            record("erp-objects", Some("ERP"), Some("Custom Objects"), 9.5),
        ]);
        let results = rank_vendors(&snapshot, Some("CRM"), &caps(&["custom objects"]));
        assert_eq!(names(&results), vec!["crm-objects"]);
    }

    #[test]
    fn empty_filters_only_rank_and_truncate() {
        let snapshot = crm_heavy_catalog();
        let results = rank_vendors(&snapshot, Some(""), &[]);
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(
            &names(&results)[..5],
            &["other-0", "other-1", "other-2", "other-3", "other-4"]
        );
        assert_eq!(results, rank_vendors(&snapshot, None, &[]));
    }

    #[test]
    fn missing_category_excluded_only_when_filtering() {
        let snapshot = CatalogSnapshot::from_records(vec![
            record("no-category", None, Some("x"), 9.0),
            record("crm", Some("CRM"), Some("x"), 1.0),
        ]);
        assert_eq!(names(&rank_vendors(&snapshot, Some("crm"), &[])), vec!["crm"]);
        assert_eq!(
            names(&rank_vendors(&snapshot, None, &[])),
            vec!["no-category", "crm"]
        );
    }

    #[test]
    fn empty_capability_matches_any_present_features() {
        let snapshot = CatalogSnapshot::from_records(vec![
            record("features", Some("CRM"), Some("x"), 2.0),
            record("no-features", Some("CRM"), None, 3.0),
        ]);
        assert_eq!(names(&rank_vendors(&snapshot, None, &caps(&[""]))), vec!["features"]);
    }

    #[test]
    fn matching_is_literal() {
        let snapshot = CatalogSnapshot::from_records(vec![
            record("dotted", Some("C.R.M"), Some("a+b (beta)"), 2.0),
            record("plain", Some("CRM"), Some("ab beta"), 3.0),
        ]);
        assert_eq!(names(&rank_vendors(&snapshot, Some("C.R"), &[])), vec!["dotted"]);
        assert_eq!(names(&rank_vendors(&snapshot, Some("."), &[])), vec!["dotted"]);
        assert_eq!(
            names(&rank_vendors(&snapshot, None, &caps(&["a+b ("]))),
            vec!["dotted"]
        );
        assert!(rank_vendors(&snapshot, None, &caps(&["ab  beta"])).is_empty());
    }

    #[test]
    fn unmatched_and_empty_catalogs_yield_nothing() {
        assert!(rank_vendors(&crm_heavy_catalog(), Some("NonexistentCategory"), &[]).is_empty());
        let empty = CatalogSnapshot::from_records(Vec::new());
        assert!(rank_vendors(&empty, Some("CRM"), &caps(&["api"])).is_empty());
    }

    #[test]
    fn repeated_queries_are_identical() {
        let snapshot = crm_heavy_catalog();
        let first = rank_vendors(&snapshot, Some("CRM"), &caps(&["contact"]));
        let second = rank_vendors(&snapshot, Some("CRM"), &caps(&["contact"]));
        assert_eq!(first, second);
    }
}
