//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{CatalogStoreError, ProductId},
    infrastructure::dto::http::{ProductDetailDto, ProductSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductSummaryDto>>, StatusCode> {
    match state.list_products_usecase.execute().await {
        Ok(products) => {
            // Domain Model から DTO への変換
            let summaries: Vec<ProductSummaryDto> =
                products.into_iter().map(ProductSummaryDto::from).collect();
            Ok(Json(summaries))
        }
        Err(e) => {
            tracing::error!("Failed to list products: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Get product detail by ID
pub async fn get_product_detail(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<u64>,
) -> Result<Json<ProductDetailDto>, StatusCode> {
    let id = ProductId::new(product_id);
    match state.get_product_detail_usecase.execute(&id).await {
        Ok(product) => Ok(Json(ProductDetailDto::from(product))),
        Err(CatalogStoreError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get product {}: {}", product_id, e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
