//! セッション認証・認可の実装

pub mod inmemory;

pub use inmemory::InMemorySessionGate;
