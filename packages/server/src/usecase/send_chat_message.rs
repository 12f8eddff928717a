//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatMessageUseCase::execute() メソッド
//! - チャット発言（認可、タイムスタンプ採番、ログへの追加）
//!
//! ### なぜこのテストが必要か
//! - 匿名の発言が拒否され、ログが変化しないことを保証
//! - 発言者はセッション由来の Identity から決まることを確認
//! - タイムスタンプが永続化順に単調非減少であることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：認証済みユーザーの発言
//! - 異常系：匿名ユーザーの発言、ログ利用不可
//! - エッジケース：時計の巻き戻り

use std::sync::Arc;

use crate::domain::{
    Action, ChatLog, ChatMessage, ClientEventPusher, ConnectionId, EventPushError, Identity,
    MessageBody, SessionGate,
};

use super::error::SendChatMessageError;

/// チャットメッセージ送信のユースケース
pub struct SendChatMessageUseCase {
    /// SessionGate（認証・認可の抽象化）
    session_gate: Arc<dyn SessionGate>,
    /// ChatLog（データアクセス層の抽象化）
    chat_log: Arc<dyn ChatLog>,
    /// ClientEventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn ClientEventPusher>,
}

impl SendChatMessageUseCase {
    /// 新しい SendChatMessageUseCase を作成
    pub fn new(
        session_gate: Arc<dyn SessionGate>,
        chat_log: Arc<dyn ChatLog>,
        event_pusher: Arc<dyn ClientEventPusher>,
    ) -> Self {
        Self {
            session_gate,
            chat_log,
            event_pusher,
        }
    }

    /// チャットメッセージ送信を実行
    ///
    /// 発言者はクライアントが自称する名前ではなく、セッション由来の
    /// Identity から決まる。
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - タイムスタンプ採番済みのレコード（Domain Model）
    /// * `Err(SendChatMessageError)` - 認可拒否・検証失敗・ログ利用不可
    pub async fn execute(
        &self,
        identity: &Identity,
        body: MessageBody,
    ) -> Result<ChatMessage, SendChatMessageError> {
        if !self
            .session_gate
            .authorize(identity, Action::SendChatMessage)
        {
            return Err(SendChatMessageError::Denied);
        }
        // authorize が匿名を弾くので、ここでは必ずユーザー名が取れる
        let author = identity
            .user_name()
            .ok_or(SendChatMessageError::Denied)?
            .clone();

        let message = self.chat_log.append(author, body).await?;
        tracing::info!(
            "Chat message from {} persisted at {}",
            message.author,
            message.sent_at.value()
        );
        Ok(message)
    }

    /// 永続化済みメッセージを全 Active 接続へ配信
    ///
    /// 発信元の接続も対象に含まれる（ローカルエコーはしない）。
    pub async fn broadcast_message(&self, json_message: &str) {
        self.event_pusher.publish(json_message).await;
    }

    /// 発信元の接続にだけイベントを送る（エラー通知用）
    pub async fn notify_originator(
        &self,
        connection_id: &ConnectionId,
        json_message: &str,
    ) -> Result<(), EventPushError> {
        self.event_pusher.push_to(connection_id, json_message).await
    }
}

#[cfg(test)]
mod tests {
    use akinai_shared::time::ManualClock;

    use super::*;
    use crate::domain::UserName;
    use crate::infrastructure::pusher::WebSocketEventPusher;
    use crate::infrastructure::repository::InMemoryChatLog;
    use crate::infrastructure::session::InMemorySessionGate;

    fn create_usecase(clock: Arc<ManualClock>) -> (SendChatMessageUseCase, Arc<InMemoryChatLog>) {
        let chat_log = Arc::new(InMemoryChatLog::new(clock));
        let usecase = SendChatMessageUseCase::new(
            Arc::new(InMemorySessionGate::new()),
            chat_log.clone(),
            Arc::new(WebSocketEventPusher::new()),
        );
        (usecase, chat_log)
    }

    fn body(text: &str) -> MessageBody {
        MessageBody::new(text.to_string()).unwrap()
    }

    fn alice() -> Identity {
        Identity::User(UserName::new("alice".to_string()).unwrap())
    }

    #[tokio::test]
    async fn test_send_chat_message_success() {
        // テスト項目: 認証済みユーザーの発言がログに追加される
        // given (前提条件):
        let (usecase, chat_log) = create_usecase(Arc::new(ManualClock::new(1_000)));

        // when (操作):
        let message = usecase.execute(&alice(), body("hi")).await.unwrap();

        // then (期待する結果):
        assert_eq!(message.author.as_str(), "alice");
        assert_eq!(message.sent_at.value(), 1_000);
        assert_eq!(chat_log.history().await.unwrap(), vec![message]);
    }

    #[tokio::test]
    async fn test_send_chat_message_denied_for_anonymous() {
        // テスト項目: 匿名の発言が拒否され、ログが変化しない
        // given (前提条件):
        let (usecase, chat_log) = create_usecase(Arc::new(ManualClock::new(1_000)));

        // when (操作):
        let result = usecase.execute(&Identity::Anonymous, body("hi")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendChatMessageError::Denied));
        assert!(chat_log.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_timestamps_are_monotonic_across_messages() {
        // テスト項目: 時計が巻き戻ってもタイムスタンプが単調非減少
        // given (前提条件):
        let clock = Arc::new(ManualClock::new(5_000));
        let (usecase, _) = create_usecase(clock.clone());
        let first = usecase.execute(&alice(), body("first")).await.unwrap();

        // when (操作): 時計を過去に巻き戻して 2 件目を送信
        clock.set(1_000);
        let second = usecase.execute(&alice(), body("second")).await.unwrap();

        // then (期待する結果):
        assert!(second.sent_at.value() >= first.sent_at.value());
    }

    #[tokio::test]
    async fn test_send_chat_message_log_unavailable() {
        // テスト項目: ログ利用不可が Unavailable エラーになる
        // given (前提条件): append が失敗する ChatLog
        use crate::domain::ChatLogError;

        struct BrokenChatLog;

        #[async_trait::async_trait]
        impl ChatLog for BrokenChatLog {
            async fn append(
                &self,
                _author: UserName,
                _body: MessageBody,
            ) -> Result<ChatMessage, ChatLogError> {
                Err(ChatLogError::Unavailable("disk error".to_string()))
            }

            async fn history(&self) -> Result<Vec<ChatMessage>, ChatLogError> {
                Ok(Vec::new())
            }
        }

        let usecase = SendChatMessageUseCase::new(
            Arc::new(InMemorySessionGate::new()),
            Arc::new(BrokenChatLog),
            Arc::new(WebSocketEventPusher::new()),
        );

        // when (操作):
        let result = usecase.execute(&alice(), body("hi")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendChatMessageError::Unavailable(_))));
    }
}
