//! JSON ファイル永続化の Store 実装

pub mod catalog;
pub mod chat_log;

pub use catalog::JsonFileCatalogStore;
pub use chat_log::JsonFileChatLog;
