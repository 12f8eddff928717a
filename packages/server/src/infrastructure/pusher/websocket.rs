//! WebSocket を使った ClientEventPusher 実装
//!
//! ## 責務
//!
//! - ライブ接続レジストリ（ConnectionId → 状態・Identity・sender）の管理
//! - クライアントへのイベント送信（push_to, publish）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、イベント送信に
//! 使用します。これにより「接続の受付」と「イベントの配信」が分離されます。
//!
//! `publish` はレジストリのロックを保持したまま全 `Active` 接続へ送信する
//! ため、全接続が同じ相対順でブロードキャストを受け取ります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientEventPusher, ConnectionId, ConnectionState, EventPushError, Identity, PusherChannel,
};

/// ライブ接続レジストリのエントリ
struct ConnectionEntry {
    state: ConnectionState,
    identity: Identity,
    sender: PusherChannel,
}

/// WebSocket を使った ClientEventPusher 実装
pub struct WebSocketEventPusher {
    /// ライブ接続レジストリ
    ///
    /// Hub のイベント処理（connect / disconnect）からのみ変更される。
    connections: Mutex<HashMap<ConnectionId, ConnectionEntry>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketEventPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientEventPusher for WebSocketEventPusher {
    async fn subscribe(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
        sender: PusherChannel,
    ) {
        let mut connections = self.connections.lock().await;
        tracing::debug!(
            "Connection '{}' subscribed as {} (admitted)",
            connection_id,
            identity
        );
        connections.insert(
            connection_id,
            ConnectionEntry {
                state: ConnectionState::Admitted,
                identity,
                sender,
            },
        );
    }

    async fn activate(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if let Some(entry) = connections.get_mut(connection_id) {
            entry.state = ConnectionState::Active;
            tracing::debug!("Connection '{}' is now active", connection_id);
        }
    }

    async fn unsubscribe(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        // 冪等: 既に削除済みなら何もしない
        if connections.remove(connection_id).is_some() {
            tracing::debug!("Connection '{}' unsubscribed", connection_id);
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError> {
        let connections = self.connections.lock().await;
        let entry = connections
            .get(connection_id)
            .ok_or_else(|| EventPushError::ConnectionNotFound(connection_id.to_string()))?;
        entry
            .sender
            .send(content.to_string())
            .map_err(|e| EventPushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed event to connection '{}'", connection_id);
        Ok(())
    }

    async fn publish(&self, content: &str) {
        let connections = self.connections.lock().await;
        for (connection_id, entry) in connections.iter() {
            if entry.state != ConnectionState::Active {
                continue;
            }
            // ブロードキャストでは個別の送信失敗を許容する
            if let Err(e) = entry.sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to publish event to connection '{}' ({}): {}",
                    connection_id,
                    entry.identity,
                    e
                );
            }
        }
    }

    async fn count_active(&self) -> usize {
        let connections = self.connections.lock().await;
        connections
            .values()
            .filter(|entry| entry.state == ConnectionState::Active)
            .count()
    }
}
