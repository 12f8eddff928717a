//! インメモリ Chat Log 実装
//!
//! ドメイン層が定義する `ChatLog` trait の具体的な実装。
//! タイムスタンプの採番には注入された `Clock` を使い、永続化順に
//! 単調非減少となるようクランプします。

use std::sync::Arc;

use akinai_shared::time::Clock;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatLog, ChatLogError, ChatMessage, MessageBody, Timestamp, UserName};

/// Chat Log の内部状態
///
/// メッセージリストと直近のタイムスタンプを同じ Mutex で守ることで、
/// 並行 `append` でも各呼び出しがアトミックになり、採番が単調非減少に
/// 保たれる。
struct ChatLogState {
    messages: Vec<ChatMessage>,
    last_timestamp: i64,
}

/// インメモリ Chat Log 実装
pub struct InMemoryChatLog {
    clock: Arc<dyn Clock>,
    state: Mutex<ChatLogState>,
}

impl InMemoryChatLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(ChatLogState {
                messages: Vec::new(),
                last_timestamp: 0,
            }),
        }
    }
}

#[async_trait]
impl ChatLog for InMemoryChatLog {
    async fn append(
        &self,
        author: UserName,
        body: MessageBody,
    ) -> Result<ChatMessage, ChatLogError> {
        let mut state = self.state.lock().await;
        // 時計が巻き戻っても永続化順の単調性を崩さない
        let timestamp = self.clock.now_millis().max(state.last_timestamp);
        state.last_timestamp = timestamp;
        let message = ChatMessage::new(author, body, Timestamp::new(timestamp));
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn history(&self) -> Result<Vec<ChatMessage>, ChatLogError> {
        let state = self.state.lock().await;
        Ok(state.messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use akinai_shared::time::ManualClock;

    use super::*;

    fn author(name: &str) -> UserName {
        UserName::new(name.to_string()).unwrap()
    }

    fn body(text: &str) -> MessageBody {
        MessageBody::new(text.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_append_assigns_clock_timestamp() {
        // テスト項目: append が Clock の時刻でタイムスタンプを採番する
        // given (前提条件):
        let clock = Arc::new(ManualClock::new(1_000));
        let log = InMemoryChatLog::new(clock);

        // when (操作):
        let message = log.append(author("alice"), body("hi")).await.unwrap();

        // then (期待する結果):
        assert_eq!(message.sent_at.value(), 1_000);
        assert_eq!(message.author.as_str(), "alice");
        assert_eq!(message.body.as_str(), "hi");
    }

    #[tokio::test]
    async fn test_history_preserves_append_order() {
        // テスト項目: history が永続化順でメッセージを返す
        // given (前提条件):
        let clock = Arc::new(ManualClock::new(1_000));
        let log = InMemoryChatLog::new(clock.clone());
        log.append(author("alice"), body("first")).await.unwrap();
        clock.advance(10);
        log.append(author("bob"), body("second")).await.unwrap();
        clock.advance(10);
        log.append(author("alice"), body("third")).await.unwrap();

        // when (操作):
        let history = log.history().await.unwrap();

        // then (期待する結果):
        let bodies: Vec<&str> = history.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_timestamps_are_monotonic_even_if_clock_goes_backward() {
        // テスト項目: 時計が巻き戻ってもタイムスタンプが単調非減少に保たれる
        // given (前提条件):
        let clock = Arc::new(ManualClock::new(2_000));
        let log = InMemoryChatLog::new(clock.clone());
        let first = log.append(author("alice"), body("one")).await.unwrap();

        // when (操作): 時計を巻き戻して append
        clock.advance(-500);
        let second = log.append(author("alice"), body("two")).await.unwrap();

        // then (期待する結果):
        assert_eq!(first.sent_at.value(), 2_000);
        assert!(second.sent_at.value() >= first.sent_at.value());
    }

    #[tokio::test]
    async fn test_messages_are_immutable_once_persisted() {
        // テスト項目: 返却されたレコードと history のレコードが一致する
        // given (前提条件):
        let clock = Arc::new(ManualClock::new(3_000));
        let log = InMemoryChatLog::new(clock);

        // when (操作):
        let persisted = log.append(author("bob"), body("hello")).await.unwrap();
        let history = log.history().await.unwrap();

        // then (期待する結果):
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], persisted);
    }
}
