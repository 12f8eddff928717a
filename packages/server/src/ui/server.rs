//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    AddProductUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetProductDetailUseCase,
    ListProductsUseCase, SendChatMessageUseCase,
};

use super::{
    handler::{get_product_detail, health_check, list_products, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Realtime storefront server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     add_product_usecase,
///     send_chat_message_usecase,
///     list_products_usecase,
///     get_product_detail_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// AddProductUseCase（商品追加のユースケース）
    add_product_usecase: Arc<AddProductUseCase>,
    /// SendChatMessageUseCase（チャット送信のユースケース）
    send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    /// ListProductsUseCase（商品一覧取得のユースケース）
    list_products_usecase: Arc<ListProductsUseCase>,
    /// GetProductDetailUseCase（商品詳細取得のユースケース）
    get_product_detail_usecase: Arc<GetProductDetailUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        add_product_usecase: Arc<AddProductUseCase>,
        send_chat_message_usecase: Arc<SendChatMessageUseCase>,
        list_products_usecase: Arc<ListProductsUseCase>,
        get_product_detail_usecase: Arc<GetProductDetailUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            add_product_usecase,
            send_chat_message_usecase,
            list_products_usecase,
            get_product_detail_usecase,
        }
    }

    /// Build the axum router
    ///
    /// Exposed separately from `run` so tests can bind to an ephemeral port.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            add_product_usecase: self.add_product_usecase,
            send_chat_message_usecase: self.send_chat_message_usecase,
            list_products_usecase: self.list_products_usecase,
            get_product_detail_usecase: self.get_product_detail_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/products", get(list_products))
            .route("/api/products/{product_id}", get(get_product_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the realtime storefront server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Realtime storefront server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
