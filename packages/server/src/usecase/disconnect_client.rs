//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 接続のレジストリからの除去
//!
//! ### なぜこのテストが必要か
//! - 切断後の接続がブロードキャスト対象から外れることを保証
//! - 切断が冪等であることを確認（select による二重通知に耐える）
//!
//! ### どのような状況を想定しているか
//! - 正常系：切断と残存接続数の確認
//! - エッジケース：同じ接続の二重切断

use std::sync::Arc;

use crate::domain::{ClientEventPusher, ConnectionId};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// ClientEventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn ClientEventPusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(event_pusher: Arc<dyn ClientEventPusher>) -> Self {
        Self { event_pusher }
    }

    /// 切断を実行
    ///
    /// レジストリから接続を除去する。冪等で、既に除去済みなら何もしない。
    /// 永続化済みの商品・メッセージには影響しない。
    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.event_pusher.unsubscribe(connection_id).await;
        tracing::info!("Connection '{}' disconnected", connection_id);
    }

    /// 残っている Active 接続数を返す（ログ用）
    pub async fn count_remaining(&self) -> usize {
        self.event_pusher.count_active().await
    }
}
