//! Store 実装
//!
//! - `inmemory`: HashMap / Vec をストレージとするインメモリ実装（テスト用）
//! - `jsonfile`: JSON ファイルに永続化する実装（本番のデフォルト）

pub mod inmemory;
pub mod jsonfile;

pub use inmemory::{InMemoryCatalogStore, InMemoryChatLog};
pub use jsonfile::{JsonFileCatalogStore, JsonFileChatLog};
