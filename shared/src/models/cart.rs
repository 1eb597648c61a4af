//! Cart Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// Dish summary embedded in a server cart entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartDish {
    pub id: i64,
    pub name: String,
    /// Price in currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// One entry of the server-side cart (`GET /api/cart/{sessionId}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerCartEntry {
    pub dish: CartDish,
    pub quantity: u32,
}

/// Local cart line item, keyed by `dish_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub dish_id: i64,
    pub name: String,
    /// Unit price in currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Always >= 1
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(dish_id: i64, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            dish_id,
            name: name.into(),
            price,
            quantity: quantity.max(1),
        }
    }

    /// Unrounded `price × quantity`
    pub fn line_total(&self) -> Decimal {
        money::line_total(self.price, self.quantity)
    }
}

impl From<ServerCartEntry> for CartLineItem {
    fn from(entry: ServerCartEntry) -> Self {
        Self::new(entry.dish.id, entry.dish.name, entry.dish.price, entry.quantity)
    }
}
