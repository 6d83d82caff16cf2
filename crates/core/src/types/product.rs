//! Product snapshot as served by the shop admin API.
//!
//! The wire format is inherited from the service and mixes naming styles:
//! `origin_price` and `is_enabled` are snake_case while `imageUrl` and
//! `imagesUrl` are camelCase. `is_enabled` arrives as a boolean from some
//! shops and as a 0/1 number from others, so deserialization accepts both.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;

/// Immutable product snapshot as received from the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Price before discount.
    pub origin_price: Decimal,
    /// Selling price.
    pub price: Decimal,
    /// Whether the product is live in the shop.
    #[serde(deserialize_with = "bool_or_number")]
    pub is_enabled: bool,
    /// Category label.
    pub category: String,
    /// Short description.
    pub description: String,
    /// Long-form content.
    pub content: String,
    /// Primary image URL.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// Additional image URLs; the service omits the field when there are none.
    #[serde(rename = "imagesUrl", default)]
    pub images_url: Vec<String>,
}

fn bool_or_number<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolOrNumber;

    impl serde::de::Visitor<'_> for BoolOrNumber {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a boolean or a 0/1 number")
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v != 0.0)
        }
    }

    deserializer.deserialize_any(BoolOrNumber)
}
