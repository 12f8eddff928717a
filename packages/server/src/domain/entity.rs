//! ドメイン層のエンティティ

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value_object::{
    MessageBody, Price, ProductId, ProductTitle, Stock, Timestamp, UserName,
};

/// 商品
///
/// ID は Catalog Store が採番する。一度作成された商品は、ストアが
/// 置き換えられるか空にされるまで、以降に接続する全クライアントから
/// 見える。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: ProductTitle,
    pub price: Price,
    pub stock: Stock,
    /// 自由形式の属性（カテゴリ、サムネイル URL など）
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// 採番済みの ID と候補から商品を構築する
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            title: draft.title,
            price: draft.price,
            stock: draft.stock,
            attributes: draft.attributes,
        }
    }
}

/// 採番前の商品候補
///
/// 値オブジェクトの構築時点で検証済み。ID の採番は Catalog Store の責務。
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: ProductTitle,
    pub price: Price,
    pub stock: Stock,
    pub attributes: Map<String, Value>,
}

impl ProductDraft {
    pub fn new(title: ProductTitle, price: Price, stock: Stock) -> Self {
        Self {
            title,
            price,
            stock,
            attributes: Map::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// チャットメッセージ
///
/// タイムスタンプは Chat Log が永続化時に採番する（永続化順に単調非減少）。
/// 一度永続化されたメッセージは不変。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: UserName,
    pub body: MessageBody,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn new(author: UserName, body: MessageBody, sent_at: Timestamp) -> Self {
        Self {
            author,
            body,
            sent_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_draft_preserves_fields() {
        // テスト項目: from_draft が候補のフィールドをそのまま引き継ぐ
        // given (前提条件):
        let draft = ProductDraft::new(
            ProductTitle::new("Keyboard".to_string()).unwrap(),
            Price::new(49.9).unwrap(),
            Stock::new(12),
        );

        // when (操作):
        let product = Product::from_draft(ProductId::new(7), draft);

        // then (期待する結果):
        assert_eq!(product.id.value(), 7);
        assert_eq!(product.title.as_str(), "Keyboard");
        assert_eq!(product.price.value(), 49.9);
        assert_eq!(product.stock.value(), 12);
        assert!(product.attributes.is_empty());
    }

    #[test]
    fn test_product_draft_with_attributes() {
        // テスト項目: with_attributes で自由形式の属性を設定できる
        // given (前提条件):
        let mut attributes = Map::new();
        attributes.insert(
            "category".to_string(),
            Value::String("peripherals".to_string()),
        );

        // when (操作):
        let draft = ProductDraft::new(
            ProductTitle::new("Mouse".to_string()).unwrap(),
            Price::new(19.9).unwrap(),
            Stock::new(3),
        )
        .with_attributes(attributes);

        // then (期待する結果):
        assert_eq!(
            draft.attributes.get("category"),
            Some(&Value::String("peripherals".to_string()))
        );
    }

    #[test]
    fn test_product_serde_roundtrip_keeps_id() {
        // テスト項目: 永続化層で使う serde 表現が ID を保持する
        // given (前提条件):
        let product = Product::from_draft(
            ProductId::new(3),
            ProductDraft::new(
                ProductTitle::new("Desk".to_string()).unwrap(),
                Price::new(120.0).unwrap(),
                Stock::new(1),
            ),
        );

        // when (操作):
        let json = serde_json::to_string(&product).unwrap();
        let restored: Product = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(restored, product);
    }
}
