//! UseCase: 商品一覧取得処理（REST API 用）

use std::sync::Arc;

use crate::domain::{CatalogStore, CatalogStoreError, Product};

/// 商品一覧取得のユースケース
pub struct ListProductsUseCase {
    /// CatalogStore（データアクセス層の抽象化）
    catalog_store: Arc<dyn CatalogStore>,
}

impl ListProductsUseCase {
    /// 新しい ListProductsUseCase を作成
    pub fn new(catalog_store: Arc<dyn CatalogStore>) -> Self {
        Self { catalog_store }
    }

    /// 全商品を登録順で取得
    pub async fn execute(&self) -> Result<Vec<Product>, CatalogStoreError> {
        self.catalog_store.list_all().await
    }
}
