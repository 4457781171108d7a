use super::types::{ApiResponse, HEALTH_MESSAGE, HealthResponse, ReloadSummary};
use crate::catalog::CatalogStore;
use crate::query::{QueryContract, QueryResult};
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_vendor_qualification(
    Extension(store): Extension<Arc<CatalogStore>>,
    Extension(contract): Extension<Arc<QueryContract>>,
    body: Bytes,
) -> (StatusCode, Json<ApiResponse<QueryResult>>) {
    let query = match contract.parse(&body) {
        Ok(query) => query,
        Err(e) => {
            tracing::warn!("Rejected vendor query: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string())),
            );
        }
    };

    // One snapshot for the whole query, even if a reload lands meanwhile.
    let snapshot = store.current();
    let result = query.run(&snapshot);
    tracing::debug!(
        category = ?query.category(),
        capabilities = ?query.capabilities(),
        count = result.count,
        "Served vendor query"
    );

    (StatusCode::OK, Json(ApiResponse::success(result)))
}

pub async fn handle_health(
    Extension(store): Extension<Arc<CatalogStore>>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: HEALTH_MESSAGE.to_string(),
            records: store.current().len(),
        }),
    )
}

pub async fn handle_reload(
    Extension(store): Extension<Arc<CatalogStore>>,
) -> (StatusCode, Json<ApiResponse<ReloadSummary>>) {
    let source = store.source().display().to_string();
    let reload_store = store.clone();
    let outcome = tokio::task::spawn_blocking(move || reload_store.reload()).await;

    match outcome {
        Ok(Ok(snapshot)) => {
            tracing::info!(
                "Reloaded catalog from {} ({} records, {} skipped)",
                source,
                snapshot.len(),
                snapshot.skipped_rows()
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(ReloadSummary {
                    records: snapshot.len(),
                    skipped_rows: snapshot.skipped_rows(),
                    source,
                })),
            )
        }
        Ok(Err(e)) => {
            tracing::error!("Catalog reload failed, keeping previous snapshot: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        }
        Err(e) => {
            tracing::error!("Catalog reload task failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("catalog reload did not complete")),
            )
        }
    }
}
