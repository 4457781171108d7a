//! Vendor catalog storage.
//!
//! The catalog is read once from a tabular file (`data/vendor_catalog.csv`
//! by default) into an immutable `CatalogSnapshot`. `CatalogStore` owns the
//! snapshot currently being served and swaps in fresh ones on reload.

pub mod error;
pub mod model;
pub mod snapshot;
pub mod store;

pub use error::LoadError;
pub use model::{REQUIRED_COLUMNS, VendorRecord, VendorSummary, normalize_column_name};
pub use snapshot::{CatalogFormat, CatalogSnapshot};
pub use store::CatalogStore;
