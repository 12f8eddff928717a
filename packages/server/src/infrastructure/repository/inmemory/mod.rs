//! インメモリ Store 実装

pub mod catalog;
pub mod chat_log;

pub use catalog::InMemoryCatalogStore;
pub use chat_log::InMemoryChatLog;
