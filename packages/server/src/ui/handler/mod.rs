//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{get_product_detail, health_check, list_products};
pub use websocket::websocket_handler;
