//! ドメイン層の値オブジェクト
//!
//! 不正な値がドメインに入り込まないよう、コンストラクタで検証を行います。
//! 検証エラーはそのまま「ユーザーが修正可能な入力不正」として UI 層へ
//! 返されます。

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// チャットメッセージ本文の最大長（文字数）
pub const MAX_MESSAGE_BODY_CHARS: usize = 1000;

/// 商品 ID
///
/// Catalog Store が採番する一意な識別子。作成後は不変。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductTitleError {
    #[error("product title must not be empty")]
    Empty,
}

/// 商品タイトル（空文字列は不可）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTitle(String);

impl ProductTitle {
    pub fn new(value: String) -> Result<Self, ProductTitleError> {
        if value.trim().is_empty() {
            return Err(ProductTitleError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    #[error("price must be a finite number")]
    NotFinite,
    #[error("price must not be negative, got {0}")]
    Negative(f64),
}

/// 商品価格（有限かつ非負）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if value < 0.0 {
            return Err(PriceError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// 在庫数
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Stock(u64);

impl Stock {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("user name must not be empty")]
    Empty,
}

/// ユーザー名（空文字列は不可）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(value: String) -> Result<Self, UserNameError> {
        if value.trim().is_empty() {
            return Err(UserNameError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageBodyError {
    #[error("message body must not be empty")]
    Empty,
    #[error("message body exceeds {MAX_MESSAGE_BODY_CHARS} characters, got {0}")]
    TooLong(usize),
}

/// チャットメッセージ本文（空は不可、最大 1000 文字）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Result<Self, MessageBodyError> {
        if value.trim().is_empty() {
            return Err(MessageBodyError::Empty);
        }
        let chars = value.chars().count();
        if chars > MAX_MESSAGE_BODY_CHARS {
            return Err(MessageBodyError::TooLong(chars));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// タイムスタンプ（JST、ミリ秒単位の Unix time）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 接続 ID
///
/// トランスポートのハンドシェイク時にサーバーが採番する一時的な識別子。
/// 接続のライフタイムの間だけ有効で、永続化されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ConnectionId のファクトリ
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// 新しい ConnectionId を生成（UUID v4）
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4())
    }
}
