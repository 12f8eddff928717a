//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{CatalogStoreError, ChatLogError};

/// 接続処理のエラー
///
/// スナップショット取得の失敗は接続を拒否しないため、ここには現れない
/// （`CatalogStoreError` のままハンドラ側でログに落とす）。
#[derive(Debug, Error, PartialEq)]
pub enum ConnectError {
    #[error("connection is not authorized to browse the catalog")]
    Denied,
}

/// 商品追加処理のエラー
#[derive(Debug, Error, PartialEq)]
pub enum AddProductError {
    #[error("identity is not authorized to add products")]
    Denied,
    #[error("{0}")]
    Validation(String),
    #[error("catalog store is unavailable: {0}")]
    Unavailable(String),
}

impl From<CatalogStoreError> for AddProductError {
    fn from(e: CatalogStoreError) -> Self {
        match e {
            CatalogStoreError::Validation(msg) => AddProductError::Validation(msg),
            CatalogStoreError::NotFound(msg) => AddProductError::Unavailable(msg),
            CatalogStoreError::Unavailable(msg) => AddProductError::Unavailable(msg),
        }
    }
}

/// チャットメッセージ送信処理のエラー
#[derive(Debug, Error, PartialEq)]
pub enum SendChatMessageError {
    #[error("identity is not authorized to send chat messages")]
    Denied,
    #[error("{0}")]
    Validation(String),
    #[error("chat log is unavailable: {0}")]
    Unavailable(String),
}

impl From<ChatLogError> for SendChatMessageError {
    fn from(e: ChatLogError) -> Self {
        match e {
            ChatLogError::Validation(msg) => SendChatMessageError::Validation(msg),
            ChatLogError::Unavailable(msg) => SendChatMessageError::Unavailable(msg),
        }
    }
}
