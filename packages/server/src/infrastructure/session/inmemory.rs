//! インメモリの Session Gate 実装
//!
//! セッショントークン → ユーザー名の対応をメモリ上に保持します。
//! ログイン機構そのものはこのサービスの外側にあり、ここでは受け取った
//! トークンの照合と、アクションごとの認可判定だけを行います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Action, Identity, SessionGate, UserName};

/// インメモリの Session Gate 実装
pub struct InMemorySessionGate {
    sessions: Mutex<HashMap<String, UserName>>,
}

impl InMemorySessionGate {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// セッションを登録する（ログイン成立時に呼ばれる想定）
    pub async fn insert_session(&self, token: impl Into<String>, user_name: UserName) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.into(), user_name);
    }

    /// セッションを破棄する（ログアウト時に呼ばれる想定）
    pub async fn remove_session(&self, token: &str) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(token);
    }
}

impl Default for InMemorySessionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionGate for InMemorySessionGate {
    async fn authenticate(&self, session_token: Option<&str>) -> Identity {
        let Some(token) = session_token else {
            return Identity::Anonymous;
        };
        let sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(user_name) => Identity::User(user_name.clone()),
            None => {
                tracing::debug!("Unknown session token, treating as anonymous");
                Identity::Anonymous
            }
        }
    }

    fn authorize(&self, identity: &Identity, action: Action) -> bool {
        match action {
            // カタログの閲覧と出品は誰でもできる
            Action::BrowseCatalog | Action::AddProduct => true,
            // チャットへの発言はログイン済みユーザーのみ
            Action::SendChatMessage => !identity.is_anonymous(),
        }
    }
}
