//! インメモリ Catalog Store 実装
//!
//! ドメイン層が定義する `CatalogStore` trait の具体的な実装。
//! Vec をインメモリ DB として使用します。主にテストで使いますが、
//! 永続化不要の環境ではそのまま本番でも使えます。

use tokio::sync::Mutex;

use crate::domain::{CatalogStore, CatalogStoreError, Product, ProductDraft, ProductId};
use async_trait::async_trait;

/// Catalog Store の内部状態
///
/// 商品リストと採番カウンタを同じ Mutex で守ることで、並行 `add` でも
/// ID が重複せず、書き込みが失われないことを保証する。
struct CatalogState {
    products: Vec<Product>,
    next_id: u64,
}

/// インメモリ Catalog Store 実装
pub struct InMemoryCatalogStore {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalogStore {
    /// 空のカタログで初期化する
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CatalogState {
                products: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_all(&self) -> Result<Vec<Product>, CatalogStoreError> {
        let state = self.state.lock().await;
        Ok(state.products.clone())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, CatalogStoreError> {
        let state = self.state.lock().await;
        state
            .products
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or_else(|| CatalogStoreError::NotFound(id.to_string()))
    }

    async fn add(&self, draft: ProductDraft) -> Result<Product, CatalogStoreError> {
        let mut state = self.state.lock().await;
        let id = ProductId::new(state.next_id);
        state.next_id += 1;
        let product = Product::from_draft(id, draft);
        state.products.push(product.clone());
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Price, ProductTitle, Stock};

    fn draft(title: &str, price: f64) -> ProductDraft {
        ProductDraft::new(
            ProductTitle::new(title.to_string()).unwrap(),
            Price::new(price).unwrap(),
            Stock::new(0),
        )
    }

    #[tokio::test]
    async fn test_add_assigns_fresh_id_and_persists() {
        // テスト項目: add が新しい ID を採番し、list_all に反映される
        // given (前提条件):
        let store = InMemoryCatalogStore::new();

        // when (操作):
        let product = store.add(draft("Keyboard", 49.9)).await.unwrap();

        // then (期待する結果):
        assert_eq!(product.id.value(), 1);
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], product);
    }

    #[tokio::test]
    async fn test_list_all_returns_insertion_order() {
        // テスト項目: list_all が登録順で商品を返す
        // given (前提条件):
        let store = InMemoryCatalogStore::new();
        store.add(draft("First", 1.0)).await.unwrap();
        store.add(draft("Second", 2.0)).await.unwrap();
        store.add(draft("Third", 3.0)).await.unwrap();

        // when (操作):
        let all = store.list_all().await.unwrap();

        // then (期待する結果):
        let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_get_by_id_returns_product() {
        // テスト項目: get_by_id が該当する商品を返す
        // given (前提条件):
        let store = InMemoryCatalogStore::new();
        let added = store.add(draft("Keyboard", 49.9)).await.unwrap();

        // when (操作):
        let found = store.get_by_id(&added.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(found, added);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        // テスト項目: 存在しない ID の取得が NotFound になる
        // given (前提条件):
        let store = InMemoryCatalogStore::new();

        // when (操作):
        let result = store.get_by_id(&ProductId::new(999)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(CatalogStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_adds_yield_distinct_ids() {
        // テスト項目: 並行 add で ID が重複せず、書き込みが失われない
        // given (前提条件):
        let store = Arc::new(InMemoryCatalogStore::new());
        let tasks = 10;

        // when (操作): 10 タスクから同時に add
        let mut handles = Vec::new();
        for i in 0..tasks {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add(draft(&format!("Product {i}"), 1.0)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // then (期待する結果): 呼び出し 1 回につき商品 1 件、ID は互いに異なる
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), tasks);
        let mut ids: Vec<u64> = all.iter().map(|p| p.id.value()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tasks);
    }
}
