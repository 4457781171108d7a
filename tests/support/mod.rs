#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use vendor_qualification::{CatalogSnapshot, DEFAULT_CATALOG_FILE, VendorRecord};

pub const CATALOG_HEADER: &str = "Product Name,Main Category,Parsed Features,Rating,Seller\n";

/// The sample catalog shipped under `data/`.
pub fn sample_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CATALOG_FILE)
}

pub fn sample_snapshot() -> CatalogSnapshot {
    CatalogSnapshot::load(&sample_catalog_path()).expect("sample catalog loads")
}

/// Write `body` under a CSV header into a fresh temp dir.
pub fn write_catalog(body: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("failed to allocate catalog dir")?;
    let path = dir.path().join("vendors.csv");
    fs::write(&path, format!("{CATALOG_HEADER}{body}"))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok((dir, path))
}

/// Twelve CRM vendors rated `[9.1, 8.7, 8.7, ...]` followed by five
/// higher-rated vendors from other categories.
pub fn crm_scenario() -> CatalogSnapshot {
    let crm_ratings = [9.1, 8.7, 8.7, 8.4, 8.0, 7.6, 7.2, 7.0, 6.9, 6.1, 5.5, 5.0];
    let mut records: Vec<VendorRecord> = crm_ratings
        .iter()
        .enumerate()
        .map(|(idx, rating)| {
            VendorRecord::new(
                format!("crm-{idx}"),
                Some("CRM Software"),
                Some(if idx % 4 == 0 {
                    "Custom Objects, Reporting"
                } else {
                    "Reporting"
                }),
                *rating,
            )
        })
        .collect();
    for idx in 0..5 {
        records.push(VendorRecord::new(
            format!("erp-{idx}"),
            Some("ERP Software"),
            Some(if idx == 0 { "custom objects" } else { "Inventory" }),
            9.5,
        ));
    }
    CatalogSnapshot::from_records(records)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
