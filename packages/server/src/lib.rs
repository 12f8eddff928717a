//! Real-time storefront server library.
//!
//! This library provides the synchronization layer for the Akinai
//! storefront: a live-updating product catalog and a chat channel mirrored
//! to every connected WebSocket client, gated by session-based
//! authentication.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
