//! UseCase: 商品詳細取得処理（REST API 用）

use std::sync::Arc;

use crate::domain::{CatalogStore, CatalogStoreError, Product, ProductId};

/// 商品詳細取得のユースケース
pub struct GetProductDetailUseCase {
    /// CatalogStore（データアクセス層の抽象化）
    catalog_store: Arc<dyn CatalogStore>,
}

impl GetProductDetailUseCase {
    /// 新しい GetProductDetailUseCase を作成
    pub fn new(catalog_store: Arc<dyn CatalogStore>) -> Self {
        Self { catalog_store }
    }

    /// ID を指定して商品を取得
    pub async fn execute(&self, id: &ProductId) -> Result<Product, CatalogStoreError> {
        self.catalog_store.get_by_id(id).await
    }
}
