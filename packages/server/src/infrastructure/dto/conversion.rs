//! ドメインモデル ⇔ DTO の変換
//!
//! クライアントから受信したフレームのペイロードは、ここで値オブジェクトの
//! 検証を通してドメインモデルに変換されます。検証エラーのメッセージは
//! そのまま `addError` イベントとしてクライアントへ返されます。

use serde_json::{Map, Value};

use crate::domain::{
    CatalogStoreError, ChatMessage, Price, Product, ProductDraft, ProductTitle, Stock,
};

use super::http::{ProductDetailDto, ProductSummaryDto};
use super::websocket::{ChatMessageEvent, EventType, ProductDto};

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.value(),
            title: product.title.into_string(),
            price: product.price.value(),
            stock: product.stock.value(),
            attributes: product.attributes,
        }
    }
}

impl From<Product> for ProductSummaryDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.value(),
            title: product.title.into_string(),
            price: product.price.value(),
            stock: product.stock.value(),
        }
    }
}

impl From<Product> for ProductDetailDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.value(),
            title: product.title.into_string(),
            price: product.price.value(),
            stock: product.stock.value(),
            attributes: product.attributes,
        }
    }
}

impl From<ChatMessage> for ChatMessageEvent {
    fn from(message: ChatMessage) -> Self {
        Self {
            r#type: EventType::ChatMessage,
            user: message.author.into_string(),
            message: message.body.into_string(),
            timestamp: message.sent_at.value(),
        }
    }
}

/// ワイヤ表現で固定フィールドとして出力されるキー
///
/// 追加属性は `#[serde(flatten)]` でトップレベルに展開されるため、
/// これらと同名の属性を許すと同じキーが重複して出力され、クライアント側で
/// 固定フィールドを上書きできてしまう。取り込み時に落とす。
const RESERVED_ATTRIBUTE_KEYS: [&str; 5] = ["type", "id", "title", "price", "stock"];

/// addProduct フレームのペイロードから商品候補を構築する
///
/// フィールドの欠落も値の不正もすべて `Validation` に落とす。
/// 固定フィールドと衝突する追加属性は黙って捨てる。
pub fn draft_from_add_product(
    title: Option<String>,
    price: Option<f64>,
    stock: Option<u64>,
    attributes: Option<Map<String, Value>>,
) -> Result<ProductDraft, CatalogStoreError> {
    let title = title.ok_or_else(|| {
        CatalogStoreError::Validation("product title is required".to_string())
    })?;
    let title =
        ProductTitle::new(title).map_err(|e| CatalogStoreError::Validation(e.to_string()))?;
    let price = price.ok_or_else(|| {
        CatalogStoreError::Validation("product price is required".to_string())
    })?;
    let price = Price::new(price).map_err(|e| CatalogStoreError::Validation(e.to_string()))?;
    let stock = Stock::new(stock.unwrap_or_default());

    let mut draft = ProductDraft::new(title, price, stock);
    if let Some(mut attributes) = attributes {
        attributes.retain(|key, _| !RESERVED_ATTRIBUTE_KEYS.contains(&key.as_str()));
        draft = draft.with_attributes(attributes);
    }
    Ok(draft)
}
