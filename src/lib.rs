//! Vendor qualification lookup.
//!
//! Given an optional software category and a list of required capabilities,
//! the crate returns the ten highest-rated vendors from an in-memory catalog
//! that satisfy every constraint. The modules split along that flow:
//!
//! - **`catalog`**: loads the vendor table into immutable snapshots and keeps
//!   the one currently being served.
//! - **`query`**: the request contract and the filter-rank-truncate engine.
//! - **`service`**: the axum HTTP shell (`/vendor_qualification`, `/health`,
//!   `/catalog/reload`).
//! - **`config`**: bind address, catalog path, and log level from defaults,
//!   environment, and flags.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod config;
pub mod query;
pub mod service;

pub use catalog::{
    CatalogFormat, CatalogSnapshot, CatalogStore, LoadError, VendorRecord, VendorSummary,
};
pub use config::ServiceConfig;
pub use query::{
    MAX_RESULTS, MalformedQueryError, QueryContract, QueryResult, VendorQuery, rank_vendors,
};

/// Catalog location relative to the repository root.
pub const DEFAULT_CATALOG_FILE: &str = "data/vendor_catalog.csv";
const ROOT_ENV: &str = "VENDOR_ROOT";

/// A directory counts as the repository root when it holds the default catalog.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(DEFAULT_CATALOG_FILE).is_file()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    let hint = Path::new(hint);
    if hint.as_os_str().is_empty() || !is_repo_root(hint) {
        return None;
    }
    fs::canonicalize(hint).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let start = fs::canonicalize(start).ok()?;
    start
        .ancestors()
        .find(|dir| is_repo_root(dir))
        .map(Path::to_path_buf)
}

/// Locate the checkout that ships `data/vendor_catalog.csv`.
///
/// Without `--catalog` or `VENDOR_CATALOG_PATH` the binaries serve the
/// bundled sample catalog, and they may be launched from anywhere inside
/// or below the checkout (a `target/` build directory in particular).
/// `VENDOR_ROOT` wins, then the ancestors of the running executable, then
/// the crate directory recorded at compile time.
pub fn find_repo_root() -> Option<PathBuf> {
    env::var(ROOT_ENV)
        .ok()
        .and_then(|root| repo_root_from_hint(&root))
        .or_else(|| {
            let exe = env::current_exe().ok()?;
            search_upwards(exe.parent()?)
        })
        .or_else(|| repo_root_from_hint(env!("CARGO_MANIFEST_DIR")))
}

/// Default catalog path: under the repository root when one is found,
/// otherwise relative to the working directory.
pub fn default_catalog_path() -> PathBuf {
    find_repo_root()
        .map(|root| root.join(DEFAULT_CATALOG_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE))
}
