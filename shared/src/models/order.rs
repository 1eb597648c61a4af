//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CartLineItem;

/// Order type selected in the cart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Direct delivery order
    #[default]
    Regular,
    /// Bulk catering inquiry (20+ guests)
    Catering,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Regular => "regular",
            OrderType::Catering => "catering",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regular order contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

/// Catering inquiry form
///
/// `guests` keeps the raw text the user typed; it is parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CateringDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// ISO date (`YYYY-MM-DD`)
    pub event_date: String,
    pub guests: String,
    #[serde(default)]
    pub preferences: String,
}

/// Body of `POST /api/orders/{sessionId}`
///
/// `items` is always sent empty: the backend derives line items from its own
/// cart record keyed by session id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    /// Total in currency unit, rounded to 2 decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub payment_intent_id: String,
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

impl OrderRequest {
    /// Regular delivery order payload
    pub fn regular(details: &OrderDetails, total_price: Decimal, payment_intent_id: impl Into<String>) -> Self {
        Self {
            order_type: OrderType::Regular,
            name: details.name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone(),
            address: Some(details.address.clone()),
            event_date: None,
            guests: None,
            preferences: None,
            total_price,
            payment_intent_id: payment_intent_id.into(),
            items: Vec::new(),
        }
    }

    /// Catering inquiry payload; `guests` must already be parsed and validated
    pub fn catering(
        details: &CateringDetails,
        guests: u32,
        total_price: Decimal,
        payment_intent_id: impl Into<String>,
    ) -> Self {
        Self {
            order_type: OrderType::Catering,
            name: details.name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone(),
            address: None,
            event_date: Some(details.event_date.clone()),
            guests: Some(guests),
            preferences: Some(details.preferences.clone()),
            total_price,
            payment_intent_id: payment_intent_id.into(),
            items: Vec::new(),
        }
    }
}
