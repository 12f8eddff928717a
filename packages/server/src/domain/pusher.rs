//! クライアントへのイベント配信（pub/sub）の抽象化
//!
//! Realtime Hub はこの trait を通じてのみクライアントへイベントを送ります。
//! 特定のトランスポートライブラリには依存しません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::EventPushError, session::Identity, value_object::ConnectionId};

/// 接続ごとのイベント送信チャンネル
///
/// シリアライズ済みの JSON 文字列を、その接続のソケット書き込みタスクへ
/// 渡すためのチャンネル。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 接続のライフサイクル状態
///
/// 全体の遷移は `Connecting → Admitted → Active → Closed`。
/// レジストリに存在するのは `Admitted` と `Active` のみで、
/// `Connecting` は登録前、`Closed` は登録解除後に相当する
/// （`Closed` は終端で、以降イベントは配信されない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// 認証解決済み。初期スナップショット送信前で、ブロードキャスト対象外。
    Admitted,
    /// 初期スナップショット送信済み。ブロードキャスト対象。
    Active,
}

/// イベント Pusher（pub/sub インターフェース）
#[async_trait]
pub trait ClientEventPusher: Send + Sync {
    /// 接続を登録する（`Admitted` 状態で開始）
    async fn subscribe(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
        sender: PusherChannel,
    );

    /// 接続を `Active` に遷移させる（初期スナップショット送信後に呼ぶ）
    async fn activate(&self, connection_id: &ConnectionId);

    /// 接続を登録解除する（冪等）
    async fn unsubscribe(&self, connection_id: &ConnectionId);

    /// 特定の接続にのみイベントを送信する
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError>;

    /// `Active` な全接続にイベントを配信する
    ///
    /// 配信対象は呼び出し時点の `Active` 集合で評価される。登録解除済みの
    /// 接続が対象になることはない。個別の送信失敗は許容する（後続の
    /// 切断処理に委ねる）。
    async fn publish(&self, content: &str);

    /// `Active` な接続数を返す
    async fn count_active(&self) -> usize;
}
