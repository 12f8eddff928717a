//! ドメイン層
//!
//! ストアフロントの中核となる概念（商品、チャットメッセージ、接続、
//! アイデンティティ）と、ドメイン層が必要とするインターフェース
//! （Store / SessionGate / EventPusher）を定義します。
//!
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod entity;
pub mod error;
pub mod pusher;
pub mod session;
pub mod store;
pub mod value_object;

pub use entity::{ChatMessage, Product, ProductDraft};
pub use error::{CatalogStoreError, ChatLogError, EventPushError};
pub use pusher::{ClientEventPusher, ConnectionState, PusherChannel};
pub use session::{Action, Identity, SessionGate};
pub use store::{CatalogStore, ChatLog};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, MessageBody, Price, ProductId, ProductTitle, Stock,
    Timestamp, UserName,
};
