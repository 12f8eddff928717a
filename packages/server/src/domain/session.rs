//! セッションゲート
//!
//! 外部の HTTP セッション層が確立したセッション状態を参照し、
//! リアルタイム接続の認証（authenticate）と認可（authorize）を行います。
//! セッションの発行・破棄はこのクレートの範囲外です。

use std::fmt;

use async_trait::async_trait;

use super::value_object::UserName;

/// 接続に紐づくアイデンティティ
///
/// `Anonymous` でも接続自体は許可される（Admitted）が、実行できる
/// アクションは制限される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// 未認証
    Anonymous,
    /// 認証済みユーザー
    User(UserName),
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    pub fn user_name(&self) -> Option<&UserName> {
        match self {
            Identity::Anonymous => None,
            Identity::User(name) => Some(name),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Anonymous => write!(f, "anonymous"),
            Identity::User(name) => write!(f, "user:{}", name),
        }
    }
}

/// 認可対象のアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// カタログの閲覧（スナップショットの受信）
    BrowseCatalog,
    /// 商品の追加
    AddProduct,
    /// チャットメッセージの送信
    SendChatMessage,
}

/// セッションゲート
///
/// `authenticate` はトランスポートのハンドシェイクに付随するセッション
/// トークンから Identity を導出する。既に確立されたセッション状態を
/// 読むだけで、ネットワーク I/O は行わない。
///
/// `authorize` で拒否されたアクションはいかなる Store も変更してはならず、
/// 結果は要求元の接続にのみ通知される（ブロードキャストしない）。
#[async_trait]
pub trait SessionGate: Send + Sync {
    /// セッショントークンから Identity を導出する
    ///
    /// トークンが無い、または未知の場合は `Anonymous` を返す。失敗しない。
    async fn authenticate(&self, session_token: Option<&str>) -> Identity;

    /// アクションの認可判定
    fn authorize(&self, identity: &Identity, action: Action) -> bool;
}
