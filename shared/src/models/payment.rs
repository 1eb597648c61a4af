//! Payment intent payloads

use serde::{Deserialize, Serialize};

/// Body of `POST /api/create-payment-intent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Amount in minor currency units (cents)
    pub amount: i64,
    /// ISO currency code, lowercase (e.g. "usd")
    pub currency: String,
    pub session_id: String,
}

/// Response of `POST /api/create-payment-intent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    /// Payment authorization handle handed to the payment provider
    pub client_secret: String,
}
