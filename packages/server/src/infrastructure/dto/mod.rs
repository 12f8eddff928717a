//! DTO（Data Transfer Object）の定義
//!
//! ## 概要
//!
//! ワイヤ上の表現（WebSocket の JSON イベント、HTTP レスポンス）と
//! ドメインモデルを分離するための型を定義します。
//!
//! - `websocket`: WebSocket イベントの入出力フレーム
//! - `http`: REST API のレスポンス DTO
//! - `conversion`: ドメインモデル ⇔ DTO の変換

pub mod conversion;
pub mod http;
pub mod websocket;

pub use http::{ProductDetailDto, ProductSummaryDto};
pub use websocket::{
    AddErrorMessage, ChatMessageEvent, ClientFrame, InitialProductsMessage, ProductDto,
    ProductUpdatedMessage,
};
