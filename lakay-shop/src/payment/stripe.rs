//! Stripe confirmation via REST API (no SDK dependency)
//!
//! Confirms a PaymentIntent client-side with the publishable key and the
//! intent's client secret, the same call Stripe.js makes from a browser.

use async_trait::async_trait;
use serde::Deserialize;

use super::{BillingDetails, PaymentConfirmation, PaymentConfirmer, PaymentError, payment_intent_id};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Deserialize)]
struct IntentResponse {
    id: String,
    status: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// [`PaymentConfirmer`] backed by Stripe's PaymentIntent confirm endpoint
///
/// `card_token` is the opaque reference produced by Stripe's card element
/// (`tok_...`); raw card numbers never reach this type.
#[derive(Debug, Clone)]
pub struct StripeConfirmer {
    client: reqwest::Client,
    publishable_key: String,
    card_token: String,
    api_base: String,
    return_url: Option<String>,
}

impl StripeConfirmer {
    pub fn new(publishable_key: impl Into<String>, card_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            publishable_key: publishable_key.into(),
            card_token: card_token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            return_url: None,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Where the provider sends the customer after an off-site authentication step
    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl PaymentConfirmer for StripeConfirmer {
    async fn confirm(
        &self,
        client_secret: &str,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation, PaymentError> {
        if self.publishable_key.is_empty() {
            return Err(PaymentError::Config("Stripe publishable key is not set".into()));
        }
        let intent_id = payment_intent_id(client_secret)?;
        let url = format!("{}/v1/payment_intents/{}/confirm", self.api_base, intent_id);

        let mut form = vec![
            ("client_secret", client_secret),
            ("payment_method_data[type]", "card"),
            ("payment_method_data[card][token]", self.card_token.as_str()),
            ("payment_method_data[billing_details][name]", billing.name.as_str()),
            ("payment_method_data[billing_details][email]", billing.email.as_str()),
            ("payment_method_data[billing_details][phone]", billing.phone.as_str()),
        ];
        if let Some(return_url) = &self.return_url {
            form.push(("return_url", return_url.as_str()));
        }

        tracing::debug!(payment_intent = intent_id, "Confirming payment intent");
        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.publishable_key, None::<&str>)
            .form(&form)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            // Stripe's own wording is what the customer sees
            if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&body)
                && let Some(message) = err.error.message
            {
                tracing::warn!(payment_intent = intent_id, %status, %message, "Payment declined");
                return Err(PaymentError::Declined(message));
            }
            return Err(PaymentError::InvalidResponse(format!(
                "{}: {}",
                status,
                String::from_utf8_lossy(&body)
            )));
        }

        let intent: IntentResponse = serde_json::from_slice(&body)
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;
        match intent.status.as_str() {
            "succeeded" | "processing" | "requires_capture" => {
                tracing::info!(payment_intent = %intent.id, status = %intent.status, "Payment confirmed");
                Ok(PaymentConfirmation {
                    payment_intent_id: intent.id,
                })
            }
            "requires_action" => Err(PaymentError::ActionRequired),
            other => Err(PaymentError::InvalidResponse(format!(
                "unexpected payment intent status: {other}"
            ))),
        }
    }
}
