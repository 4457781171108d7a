//! Vendor lookup over a catalog snapshot.
//!
//! - **`engine`**: the filter-rank-truncate core (`rank_vendors`).
//! - **`types`**: the inbound `VendorQuery` and outbound `QueryResult` contracts.
//! - **`contract`**: JSON Schema validation that turns raw request bodies into
//!   queries or `MalformedQueryError`s.

pub mod contract;
pub mod engine;
pub mod types;

pub use contract::{MalformedQueryError, QueryContract};
pub use engine::{MAX_RESULTS, rank_vendors};
pub use types::{QueryResult, VendorQuery};
