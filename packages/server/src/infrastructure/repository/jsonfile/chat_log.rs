//! JSON ファイル永続化の Chat Log 実装
//!
//! メッセージ全件を単一の JSON 配列ファイル（`messages.json`）として
//! 保持します。タイムスタンプの採番と単調性の保証はインメモリ実装と
//! 同じで、ファイルへの書き出しだけが加わります。
//!
//! I/O 失敗は `Unavailable` として呼び出し元へ返し、プロセスは停止しません。

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use akinai_shared::time::Clock;
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::{ChatLog, ChatLogError, ChatMessage, MessageBody, Timestamp, UserName};

struct ChatLogState {
    messages: Vec<ChatMessage>,
    last_timestamp: i64,
}

/// JSON ファイル永続化の Chat Log 実装
pub struct JsonFileChatLog {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    state: Mutex<ChatLogState>,
}

impl JsonFileChatLog {
    /// ファイルから読み込んで初期化する
    ///
    /// ファイルが存在しない場合は空のログで開始する。単調性の基準となる
    /// 直近タイムスタンプは既存メッセージの最大値を引き継ぐ。
    pub async fn load(
        path: impl Into<PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ChatLogError> {
        let path = path.into();
        let messages: Vec<ChatMessage> = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ChatLogError::Unavailable(format!("failed to parse {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(ChatLogError::Unavailable(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        let last_timestamp = messages.iter().map(|m| m.sent_at.value()).max().unwrap_or(0);
        tracing::info!(
            "Loaded {} chat messages from {}",
            messages.len(),
            path.display()
        );
        Ok(Self {
            path,
            clock,
            state: Mutex::new(ChatLogState {
                messages,
                last_timestamp,
            }),
        })
    }

    async fn persist(&self, messages: &[ChatMessage]) -> Result<(), ChatLogError> {
        let json = serde_json::to_vec_pretty(messages).map_err(|e| {
            ChatLogError::Unavailable(format!("failed to serialize chat log: {e}"))
        })?;
        fs::write(&self.path, json).await.map_err(|e| {
            ChatLogError::Unavailable(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl ChatLog for JsonFileChatLog {
    async fn append(
        &self,
        author: UserName,
        body: MessageBody,
    ) -> Result<ChatMessage, ChatLogError> {
        let mut state = self.state.lock().await;
        let timestamp = self.clock.now_millis().max(state.last_timestamp);
        let message = ChatMessage::new(author, body, Timestamp::new(timestamp));
        state.messages.push(message.clone());
        if let Err(e) = self.persist(&state.messages).await {
            state.messages.pop();
            return Err(e);
        }
        state.last_timestamp = timestamp;
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
    async fn test_append_persists_to_disk() {
        // テスト項目: append したメッセージがディスクに書き出される
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        let log = JsonFileChatLog::load(&path, Arc::new(ManualClock::new(1_000)))
            .await
            .unwrap();

        // when (操作):
        let persisted = log.append(author("alice"), body("hi")).await.unwrap();

        // then (期待する結果):
        let bytes = fs::read(&path).await.unwrap();
        let on_disk: Vec<ChatMessage> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(on_disk, vec![persisted]);
    }

    #[tokio::test]
    async fn test_reload_keeps_history_and_monotonicity() {
        // テスト項目: 再読み込み後も履歴と単調性の基準が引き継がれる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        {
            let log = JsonFileChatLog::load(&path, Arc::new(ManualClock::new(5_000)))
                .await
                .unwrap();
            log.append(author("alice"), body("before restart"))
                .await
                .unwrap();
        }

        // when (操作): 過去を指す時計で再起動して append
        let reloaded = JsonFileChatLog::load(&path, Arc::new(ManualClock::new(1_000)))
            .await
            .unwrap();
        let second = reloaded
            .append(author("bob"), body("after restart"))
            .await
            .unwrap();

        // then (期待する結果): 履歴は 2 件、タイムスタンプは巻き戻らない
        let history = reloaded.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(second.sent_at.value() >= 5_000);
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_file() {
        // テスト項目: 壊れたファイルからの起動が Unavailable になる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        fs::write(&path, b"{broken").await.unwrap();

        // when (操作):
        let result = JsonFileChatLog::load(&path, Arc::new(ManualClock::new(0))).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChatLogError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_append_failure_rolls_back_memory_state() {
        // テスト項目: 書き込み失敗時にメモリ上のログが変化しない
        // given (前提条件): 書き込み先をディレクトリにして write を失敗させる
        let dir = tempfile::tempdir().unwrap();
        let broken = JsonFileChatLog {
            path: dir.path().to_path_buf(),
            clock: Arc::new(ManualClock::new(1_000)),
            state: Mutex::new(ChatLogState {
                messages: Vec::new(),
                last_timestamp: 0,
            }),
        };

        // when (操作):
        let result = broken.append(author("alice"), body("hi")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChatLogError::Unavailable(_))));
        assert!(broken.history().await.unwrap().is_empty());
    }
}
