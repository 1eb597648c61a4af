//! Dish Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dish entity, owned by the backend catalog (read-only on the client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
}
