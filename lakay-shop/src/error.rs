//! Shop error types

use lakay_client::ClientError;
use shared::money::MoneyError;
use thiserror::Error;

use crate::payment::PaymentError;

/// A single failed form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name (`name`, `email`, `guests`, ...) or `cart` for form-level errors
    pub field: &'static str,
    pub message: String,
}

/// Validation failures collected from one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First error recorded for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> ShopResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ShopError::Validation(self))
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Shop error type
#[derive(Debug, Error)]
pub enum ShopError {
    /// Form or cart failed local validation; no request was sent
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("Backend error: {0}")]
    Client(#[from] ClientError),

    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Dish is not part of the loaded catalog
    #[error("Unknown dish: {0}")]
    UnknownDish(i64),

    /// The owning view was torn down while the request was in flight
    #[error("Request cancelled")]
    Cancelled,

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShopError {
    /// Text suitable for showing to the customer
    ///
    /// Backend and provider messages are passed through verbatim; everything
    /// else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ShopError::Validation(errors) => errors.to_string(),
            ShopError::Client(e) => e
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            ShopError::Payment(e) => e.provider_message(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ShopError::Cancelled)
    }
}

/// Result type for shop operations
pub type ShopResult<T> = Result<T, ShopError>;
