//! ドメイン層のエラー定義
//!
//! エラー分類の方針:
//! - `Validation`: 入力不正（ユーザーが修正可能）。送信元の接続にのみ通知。
//! - `NotFound`: 参照先のエンティティが存在しない。呼び出し元に通知。
//! - `Unavailable`: 永続化媒体の障害。送信元にのみ通知し、自動リトライは
//!   しない（リトライによる二重書き込みを防ぐ）。
//!
//! いずれもイベント単位のエラーであり、Hub を停止させることはない。

use thiserror::Error;

/// Catalog Store のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogStoreError {
    /// 必須フィールドの欠落や不正値
    #[error("invalid product: {0}")]
    Validation(String),
    /// 指定された商品が存在しない
    #[error("product not found: {0}")]
    NotFound(String),
    /// 永続化媒体が利用できない
    #[error("catalog storage unavailable: {0}")]
    Unavailable(String),
}

/// Chat Log のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatLogError {
    /// 本文の欠落や不正値
    #[error("invalid chat message: {0}")]
    Validation(String),
    /// 永続化媒体が利用できない
    #[error("chat log storage unavailable: {0}")]
    Unavailable(String),
}

/// イベント送信（push / publish）のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventPushError {
    /// 指定された接続がレジストリに存在しない
    #[error("connection not found: {0}")]
    ConnectionNotFound(String),
    /// チャンネルへの送信に失敗した
    #[error("failed to push event: {0}")]
    PushFailed(String),
}
