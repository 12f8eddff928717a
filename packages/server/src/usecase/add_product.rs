//! UseCase: 商品追加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AddProductUseCase::execute() メソッド
//! - 商品追加（認可、ID 採番、追加後スナップショットの取得）
//!
//! ### なぜこのテストが必要か
//! - 追加後のスナップショットに新商品が含まれることを保証
//! - バリデーション失敗・Store 失敗時にカタログが変化しないことを確認
//! - 並行追加で ID が重複しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：商品追加とスナップショット取得
//! - 異常系：Store 利用不可
//! - エッジケース：複数接続からの並行追加

use std::sync::Arc;

use crate::domain::{
    Action, CatalogStore, ClientEventPusher, ConnectionId, EventPushError, Identity, Product,
    ProductDraft, SessionGate,
};

use super::error::AddProductError;

/// 商品追加のユースケース
pub struct AddProductUseCase {
    /// SessionGate（認証・認可の抽象化）
    session_gate: Arc<dyn SessionGate>,
    /// CatalogStore（データアクセス層の抽象化）
    catalog_store: Arc<dyn CatalogStore>,
    /// ClientEventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn ClientEventPusher>,
}

impl AddProductUseCase {
    /// 新しい AddProductUseCase を作成
    pub fn new(
        session_gate: Arc<dyn SessionGate>,
        catalog_store: Arc<dyn CatalogStore>,
        event_pusher: Arc<dyn ClientEventPusher>,
    ) -> Self {
        Self {
            session_gate,
            catalog_store,
            event_pusher,
        }
    }

    /// 商品追加を実行
    ///
    /// 追加に成功した場合、追加後のカタログ全件スナップショットを返す。
    /// スナップショットには必ず新商品が含まれる（add と list_all の間に
    /// 他の接続が追加した商品が混ざることは仕様上許容される）。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Product>)` - 追加後のカタログ全件（Domain Model）
    /// * `Err(AddProductError)` - 認可拒否・検証失敗・Store 利用不可
    pub async fn execute(
        &self,
        identity: &Identity,
        draft: ProductDraft,
    ) -> Result<Vec<Product>, AddProductError> {
        if !self.session_gate.authorize(identity, Action::AddProduct) {
            return Err(AddProductError::Denied);
        }

        let product = self.catalog_store.add(draft).await?;
        tracing::info!(
            "Product '{}' added with id {} by {}",
            product.title.as_str(),
            product.id,
            identity
        );

        let snapshot = self.catalog_store.list_all().await?;
        Ok(snapshot)
    }

    /// 追加後のスナップショットを全 Active 接続へ配信
    ///
    /// 発信元の接続も対象に含まれる。
    pub async fn broadcast_snapshot(&self, json_message: &str) {
        self.event_pusher.publish(json_message).await;
    }

    /// 発信元の接続にだけイベントを送る（addError 用）
    pub async fn notify_originator(
        &self,
        connection_id: &ConnectionId,
        json_message: &str,
    ) -> Result<(), EventPushError> {
        self.event_pusher.push_to(connection_id, json_message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogStoreError, Price, ProductId, ProductTitle, Stock};
    use crate::infrastructure::pusher::WebSocketEventPusher;
    use crate::infrastructure::repository::InMemoryCatalogStore;
    use crate::infrastructure::session::InMemorySessionGate;

    fn create_usecase() -> (AddProductUseCase, Arc<InMemoryCatalogStore>) {
        let catalog_store = Arc::new(InMemoryCatalogStore::new());
        let usecase = AddProductUseCase::new(
            Arc::new(InMemorySessionGate::new()),
            catalog_store.clone(),
            Arc::new(WebSocketEventPusher::new()),
        );
        (usecase, catalog_store)
    }

    fn draft(title: &str, price: f64) -> ProductDraft {
        ProductDraft::new(
            ProductTitle::new(title.to_string()).unwrap(),
            Price::new(price).unwrap(),
            Stock::new(0),
        )
    }

    #[tokio::test]
    async fn test_add_product_returns_snapshot_including_new_product() {
        // テスト項目: 追加後のスナップショットに新商品が含まれる
        // given (前提条件):
        let (usecase, catalog_store) = create_usecase();
        catalog_store.add(draft("Existing", 1.0)).await.unwrap();

        // when (操作):
        let snapshot = usecase
            .execute(&Identity::Anonymous, draft("Keyboard", 49.9))
            .await
            .unwrap();

        // then (期待する結果): 既存 + 新商品の全件、登録順
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].title.as_str(), "Existing");
        assert_eq!(snapshot[1].title.as_str(), "Keyboard");
        assert_eq!(snapshot[1].id.value(), 2);
    }

    #[tokio::test]
    async fn test_add_product_store_unavailable() {
        // テスト項目: Store 利用不可が Unavailable エラーになる
        // given (前提条件): add が失敗する Store
        mockall::mock! {
            CatalogStoreMock {}

            #[async_trait::async_trait]
            impl CatalogStore for CatalogStoreMock {
                async fn list_all(&self) -> Result<Vec<Product>, CatalogStoreError>;
                async fn get_by_id(&self, id: &ProductId) -> Result<Product, CatalogStoreError>;
                async fn add(&self, draft: ProductDraft) -> Result<Product, CatalogStoreError>;
            }
        }

        let mut store = MockCatalogStoreMock::new();
        store
            .expect_add()
            .returning(|_| Err(CatalogStoreError::Unavailable("disk error".to_string())));
        store.expect_list_all().never();

        let usecase = AddProductUseCase::new(
            Arc::new(InMemorySessionGate::new()),
            Arc::new(store),
            Arc::new(WebSocketEventPusher::new()),
        );

        // when (操作):
        let result = usecase
            .execute(&Identity::Anonymous, draft("Keyboard", 49.9))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(AddProductError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_concurrent_adds_assign_distinct_ids() {
        // テスト項目: 並行追加でも ID が重複しない
        // given (前提条件):
        let (usecase, catalog_store) = create_usecase();
        let usecase = Arc::new(usecase);

        // when (操作): 10 件を並行に追加
        let mut handles = Vec::new();
        for i in 0..10 {
            let usecase = usecase.clone();
            handles.push(tokio::spawn(async move {
                usecase
                    .execute(&Identity::Anonymous, draft(&format!("Product {i}"), 1.0))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // then (期待する結果): 10 件すべて追加され、ID は一意
        let all = catalog_store.list_all().await.unwrap();
        assert_eq!(all.len(), 10);
        let mut ids: Vec<u64> = all.iter().map(|p| p.id.value()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
