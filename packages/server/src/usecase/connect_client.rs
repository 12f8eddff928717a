//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() / admit() / initial_snapshot() / activate()
//! - 接続の受付（認証・認可）とレジストリ登録、スナップショットの取得
//!
//! ### なぜこのテストが必要か
//! - 認証・認可（execute）だけではレジストリに登録されないことを保証
//!   （アップグレードが完了しなかった接続のエントリを残さないため）
//! - Admitted の接続がブロードキャスト対象にならないことを確認
//! - activate 後に初めてブロードキャストが届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：匿名・認証済みの接続受付、admit と activate
//! - 異常系：スナップショット取得失敗
//! - エッジケース：execute 後・admit 前の状態、activate 前のブロードキャスト

use std::sync::Arc;

use crate::domain::{
    Action, CatalogStore, CatalogStoreError, ClientEventPusher, ConnectionId, Identity, Product,
    PusherChannel, SessionGate,
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// SessionGate（認証・認可の抽象化）
    session_gate: Arc<dyn SessionGate>,
    /// CatalogStore（データアクセス層の抽象化）
    catalog_store: Arc<dyn CatalogStore>,
    /// ClientEventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn ClientEventPusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        session_gate: Arc<dyn SessionGate>,
        catalog_store: Arc<dyn CatalogStore>,
        event_pusher: Arc<dyn ClientEventPusher>,
    ) -> Self {
        Self {
            session_gate,
            catalog_store,
            event_pusher,
        }
    }

    /// 接続の受付を実行（認証・認可のみ）
    ///
    /// セッショントークンから Identity を導出し、カタログ閲覧の認可を
    /// 確認する。レジストリへの登録は行わない。登録はソケットが確立した
    /// 後に `admit` で行う（確立しなかった接続のエントリを残さないため）。
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - 受付成功（以降のアクションの認可に使う Identity）
    /// * `Err(ConnectError::Denied)` - 閲覧が認可されない
    pub async fn execute(&self, session_token: Option<&str>) -> Result<Identity, ConnectError> {
        let identity = self.session_gate.authenticate(session_token).await;
        if !self
            .session_gate
            .authorize(&identity, Action::BrowseCatalog)
        {
            return Err(ConnectError::Denied);
        }

        Ok(identity)
    }

    /// 確立した接続をレジストリに登録する（Admitted）
    ///
    /// この時点ではまだブロードキャスト対象にならない。
    pub async fn admit(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
        sender: PusherChannel,
    ) {
        self.event_pusher
            .subscribe(connection_id, identity, sender)
            .await;
    }

    /// 接続直後に送るカタログの全件スナップショットを取得
    pub async fn initial_snapshot(&self) -> Result<Vec<Product>, CatalogStoreError> {
        self.catalog_store.list_all().await
    }

    /// 接続を Active に遷移させる
    ///
    /// 以降、この接続はブロードキャストの対象になる。
    pub async fn activate(&self, connection_id: &ConnectionId) {
        self.event_pusher.activate(connection_id).await;
    }
}
