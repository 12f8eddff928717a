//! WebSocket イベントの入出力フレーム
//!
//! クライアント ⇔ サーバー間の JSON イベントを定義します。イベント種別は
//! `type` フィールド（camelCase）で判別します。
//!
//! | type              | 方向            | ペイロード                             |
//! |-------------------|-----------------|----------------------------------------|
//! | `addProduct`      | client → server | title, price, stock?, attributes?      |
//! | `chatMessage`     | client → server | user, message                          |
//! | `initialProducts` | server → client | products（全件スナップショット）       |
//! | `productUpdated`  | server → client | products（全件スナップショット）       |
//! | `addError`        | server → client | message                                |
//! | `chatMessage`     | server → client | user, message, timestamp               |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// クライアントから受信するイベントフレーム
///
/// ペイロードのフィールドはすべて Optional で受け、欠落や型不一致は
/// ドメインモデルへの変換時にバリデーションエラーとして扱う。
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientFrame {
    #[serde(rename_all = "camelCase")]
    AddProduct {
        title: Option<String>,
        price: Option<f64>,
        stock: Option<u64>,
        attributes: Option<Map<String, Value>>,
    },
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        user: Option<String>,
        message: Option<String>,
    },
}

/// サーバーから送信するイベントの種別タグ
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    InitialProducts,
    ProductUpdated,
    AddError,
    ChatMessage,
}

/// ワイヤ上の商品表現
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDto {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub stock: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// 接続直後に送るカタログの全件スナップショット
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InitialProductsMessage {
    pub r#type: EventType,
    pub products: Vec<ProductDto>,
}

impl InitialProductsMessage {
    pub fn new(products: Vec<ProductDto>) -> Self {
        Self {
            r#type: EventType::InitialProducts,
            products,
        }
    }
}

/// 出品成功後に全接続へ配るカタログの全件スナップショット
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductUpdatedMessage {
    pub r#type: EventType,
    pub products: Vec<ProductDto>,
}

impl ProductUpdatedMessage {
    pub fn new(products: Vec<ProductDto>) -> Self {
        Self {
            r#type: EventType::ProductUpdated,
            products,
        }
    }
}

/// 出品失敗を発信元だけに知らせるイベント
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddErrorMessage {
    pub r#type: EventType,
    pub message: String,
}

impl AddErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            r#type: EventType::AddError,
            message: message.into(),
        }
    }
}

/// 全接続へ配るチャットメッセージ
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessageEvent {
    pub r#type: EventType,
    pub user: String,
    pub message: String,
    pub timestamp: i64,
}
