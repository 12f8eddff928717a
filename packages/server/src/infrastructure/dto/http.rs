//! REST API のレスポンス DTO

use serde::Serialize;
use serde_json::{Map, Value};

/// 一覧（`GET /api/products`）の要素
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductSummaryDto {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub stock: u64,
}

/// 詳細（`GET /api/products/{product_id}`）のレスポンス
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDetailDto {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub stock: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}
