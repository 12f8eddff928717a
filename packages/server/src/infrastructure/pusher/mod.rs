//! イベント配信（pub/sub）の実装
//!
//! ## 概要
//!
//! このモジュールは `ClientEventPusher` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `websocket`: WebSocket を使った実装
//! - 将来的に: `redis` などプロセス外のファンアウト

pub mod websocket;

pub use websocket::WebSocketEventPusher;
