//! JSON ファイル永続化の Catalog Store 実装
//!
//! 商品全件を単一の JSON 配列ファイル（`products.json`）として保持します。
//! 書き込みは全量書き出しです。カタログは小さく追加も低頻度なので、
//! 差分書き込みより単純さを優先しています。
//!
//! I/O 失敗は `Unavailable` として呼び出し元へ返し、プロセスは停止しません。

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::{CatalogStore, CatalogStoreError, Product, ProductDraft, ProductId};

/// Catalog Store の内部状態
///
/// インメモリ実装と同様、商品リストと採番カウンタを同じ Mutex で守る。
/// ファイルへの書き出しもロック内で行い、採番とディスク上の内容の
/// 整合を保つ。
struct CatalogState {
    products: Vec<Product>,
    next_id: u64,
}

/// JSON ファイル永続化の Catalog Store 実装
pub struct JsonFileCatalogStore {
    path: PathBuf,
    state: Mutex<CatalogState>,
}

impl JsonFileCatalogStore {
    /// ファイルから読み込んで初期化する
    ///
    /// ファイルが存在しない場合は空のカタログで開始する。採番カウンタは
    /// 既存 ID の最大値 + 1（persisted-max-plus-one）で、再起動後も
    /// 一意性が保たれる。
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogStoreError> {
        let path = path.into();
        let products: Vec<Product> = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                CatalogStoreError::Unavailable(format!(
                    "failed to parse {}: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(CatalogStoreError::Unavailable(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        let next_id = products
            .iter()
            .map(|p| p.id.value())
            .max()
            .map_or(1, |max| max + 1);
        tracing::info!(
            "Loaded {} products from {} (next id: {})",
            products.len(),
            path.display(),
            next_id
        );
        Ok(Self {
            path,
            state: Mutex::new(CatalogState { products, next_id }),
        })
    }

    async fn persist(&self, products: &[Product]) -> Result<(), CatalogStoreError> {
        let json = serde_json::to_vec_pretty(products).map_err(|e| {
            CatalogStoreError::Unavailable(format!("failed to serialize catalog: {e}"))
        })?;
        fs::write(&self.path, json).await.map_err(|e| {
            CatalogStoreError::Unavailable(format!(
                "failed to write {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl CatalogStore for JsonFileCatalogStore {
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
        let product = Product::from_draft(id, draft);
        state.products.push(product.clone());
        if let Err(e) = self.persist(&state.products).await {
            // 書き込みに失敗した場合はメモリ上の状態を巻き戻す
            state.products.pop();
            return Err(e);
        }
        state.next_id += 1;
        Ok(product)
    }
}
