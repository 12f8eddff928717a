//! Store trait 定義
//!
//! ドメイン層が必要とする永続化のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Product, ProductDraft},
    error::{CatalogStoreError, ChatLogError},
    value_object::{MessageBody, ProductId, UserName},
};

/// 商品カタログの永続化インターフェース
///
/// ## 並行性
///
/// `add` は複数接続から並行に呼ばれる。ID の採番は Store 内部で
/// 直列化されなければならない（並行呼び出しでも重複せず、書き込みが
/// 失われない）。Hub 側でのロックには依存しない。
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 全商品を登録順で取得
    async fn list_all(&self) -> Result<Vec<Product>, CatalogStoreError>;

    /// ID を指定して商品を取得
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, CatalogStoreError>;

    /// 商品を追加し、採番済みのレコードを返す
    async fn add(&self, draft: ProductDraft) -> Result<Product, CatalogStoreError>;
}

/// チャットログの永続化インターフェース
///
/// 読み取りはブロードキャスト経由が原則（遅れて接続したクライアントに
/// 履歴は再送されない）。`history` はテストと診断のための補助 API。
#[async_trait]
pub trait ChatLog: Send + Sync {
    /// メッセージを永続化し、タイムスタンプ採番済みのレコードを返す
    ///
    /// タイムスタンプは永続化順に単調非減少。呼び出しごとにアトミックで、
    /// フィールド単位で他の呼び出しと交錯しない。
    async fn append(
        &self,
        author: UserName,
        body: MessageBody,
    ) -> Result<ChatMessage, ChatLogError>;

    /// 永続化済みメッセージを永続化順で取得
    async fn history(&self) -> Result<Vec<ChatMessage>, ChatLogError>;
}
