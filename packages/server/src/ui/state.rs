//! Server state and connection management.

use std::sync::Arc;

use crate::usecase::{
    AddProductUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetProductDetailUseCase,
    ListProductsUseCase, SendChatMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// AddProductUseCase（商品追加のユースケース）
    pub add_product_usecase: Arc<AddProductUseCase>,
    /// SendChatMessageUseCase（チャット送信のユースケース）
    pub send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    /// ListProductsUseCase（商品一覧取得のユースケース）
    pub list_products_usecase: Arc<ListProductsUseCase>,
    /// GetProductDetailUseCase（商品詳細取得のユースケース）
    pub get_product_detail_usecase: Arc<GetProductDetailUseCase>,
}
