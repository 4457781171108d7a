//! HTTP shell around the vendor lookup.
//!
//! ## Routes
//! - `POST /vendor_qualification`: run a `VendorQuery` against the current
//!   catalog snapshot.
//! - `GET /health`: static liveness signal plus the served record count.
//! - `POST /catalog/reload`: re-read the catalog source and publish it.
//!
//! Every JSON body is wrapped in a `status` envelope (`success`/`error`).

pub mod handlers;
pub mod types;

use crate::catalog::CatalogStore;
use crate::query::QueryContract;
use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Build the service router over a shared store and request contract.
pub fn router(store: Arc<CatalogStore>, contract: Arc<QueryContract>) -> Router {
    Router::new()
        .route("/vendor_qualification", post(handlers::handle_vendor_qualification))
        .route("/health", get(handlers::handle_health))
        .route("/catalog/reload", post(handlers::handle_reload))
        .layer(Extension(store))
        .layer(Extension(contract))
}
