//! UseCase 層
//!
//! ## 概要
//!
//! ドメイン層の trait（Store / SessionGate / ClientEventPusher）だけに
//! 依存してアプリケーションの操作を実装します。ワイヤ表現（JSON）の
//! 組み立ては UI 層の責務で、UseCase は組み立て済みの文字列を受け取って
//! 配信だけを行います。

pub mod add_product;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_product_detail;
pub mod list_products;
pub mod send_chat_message;

pub use add_product::AddProductUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{AddProductError, ConnectError, SendChatMessageError};
pub use get_product_detail::GetProductDetailUseCase;
pub use list_products::ListProductsUseCase;
pub use send_chat_message::SendChatMessageUseCase;
