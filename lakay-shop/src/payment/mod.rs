//! Payment collaborator
//!
//! The shop never sees card data. The backend creates a payment intent and
//! hands back a client secret; a [`PaymentConfirmer`] completes authorization
//! with the provider using that secret and an opaque payment-method reference.

pub(crate) mod stripe;

pub use stripe::StripeConfirmer;

use async_trait::async_trait;
use thiserror::Error;

/// Contact fields forwarded to the provider with the confirmation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Successful authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub payment_intent_id: String,
}

/// Payment error type
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Provider refused the payment; the message is the provider's own
    #[error("{0}")]
    Declined(String),

    /// Provider wants extra customer action (e.g. 3-D Secure) this client cannot perform
    #[error("Payment requires additional authentication")]
    ActionRequired,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Payment configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Text shown to the customer; declines are passed through verbatim
    pub fn provider_message(&self) -> String {
        match self {
            PaymentError::Declined(message) => message.clone(),
            PaymentError::ActionRequired => {
                "Your bank requires additional authentication for this payment.".to_string()
            }
            _ => "Payment could not be processed. Please try again.".to_string(),
        }
    }
}

/// Completes a payment authorization with the provider
#[async_trait]
pub trait PaymentConfirmer: Send + Sync {
    async fn confirm(
        &self,
        client_secret: &str,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation, PaymentError>;
}

#[async_trait]
impl<T: PaymentConfirmer + ?Sized> PaymentConfirmer for std::sync::Arc<T> {
    async fn confirm(
        &self,
        client_secret: &str,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation, PaymentError> {
        (**self).confirm(client_secret, billing).await
    }
}

/// Payment intent id embedded in a client secret (`pi_123_secret_abc` → `pi_123`)
pub fn payment_intent_id(client_secret: &str) -> Result<&str, PaymentError> {
    match client_secret.split_once("_secret_") {
        Some((id, secret)) if !id.is_empty() && !secret.is_empty() => Ok(id),
        _ => Err(PaymentError::InvalidResponse(
            "malformed payment client secret".to_string(),
        )),
    }
}
