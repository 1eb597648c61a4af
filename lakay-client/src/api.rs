//! Typed storefront endpoints
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | dish catalog | `GET /api/dishes` |
//! | session cart | `GET /api/cart/{sessionId}` |
//! | add item | `POST /api/cart/{sessionId}/add?dishId&quantity` |
//! | update quantity | `PUT /api/cart/{sessionId}/update?dishId&quantity` |
//! | remove item | `DELETE /api/cart/{sessionId}/remove?dishId` |
//! | payment intent | `POST /api/create-payment-intent` |
//! | submit order | `POST /api/orders/{sessionId}` |

use serde::de::IgnoredAny;
use shared::{Dish, OrderRequest, PaymentIntentRequest, PaymentIntentResponse, ServerCartEntry};

use crate::{ClientResult, HttpClient, NetworkHttpClient};

/// Storefront backend API over any [`HttpClient`] transport
#[derive(Debug, Clone)]
pub struct StorefrontApi<H = NetworkHttpClient> {
    http: H,
}

impl<H: HttpClient> StorefrontApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }

    /// Fetch the dish catalog
    pub async fn list_dishes(&self) -> ClientResult<Vec<Dish>> {
        self.http.get("/api/dishes").await
    }

    /// Fetch the authoritative cart for a session
    pub async fn get_cart(&self, session_id: &str) -> ClientResult<Vec<ServerCartEntry>> {
        self.http.get(&format!("/api/cart/{}", session_id)).await
    }

    /// Add `quantity` of a dish to the session cart
    pub async fn add_to_cart(&self, session_id: &str, dish_id: i64, quantity: u32) -> ClientResult<()> {
        tracing::debug!(session_id, dish_id, quantity, "Adding dish to server cart");
        let path = format!(
            "/api/cart/{}/add?dishId={}&quantity={}",
            session_id, dish_id, quantity
        );
        let _: IgnoredAny = self.http.post_empty(&path).await?;
        Ok(())
    }

    /// Set the quantity of a dish already in the session cart
    pub async fn update_cart_item(
        &self,
        session_id: &str,
        dish_id: i64,
        quantity: u32,
    ) -> ClientResult<()> {
        tracing::debug!(session_id, dish_id, quantity, "Updating server cart quantity");
        let path = format!(
            "/api/cart/{}/update?dishId={}&quantity={}",
            session_id, dish_id, quantity
        );
        let _: IgnoredAny = self.http.put_empty(&path).await?;
        Ok(())
    }

    /// Remove a dish from the session cart
    pub async fn remove_from_cart(&self, session_id: &str, dish_id: i64) -> ClientResult<()> {
        tracing::debug!(session_id, dish_id, "Removing dish from server cart");
        let path = format!("/api/cart/{}/remove?dishId={}", session_id, dish_id);
        let _: IgnoredAny = self.http.delete(&path).await?;
        Ok(())
    }

    /// Request a payment authorization handle for `request.amount` minor units
    pub async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> ClientResult<PaymentIntentResponse> {
        tracing::debug!(
            session_id = %request.session_id,
            amount = request.amount,
            currency = %request.currency,
            "Creating payment intent"
        );
        self.http.post("/api/create-payment-intent", request).await
    }

    /// Submit the finalized order for a session
    pub async fn submit_order(&self, session_id: &str, order: &OrderRequest) -> ClientResult<()> {
        tracing::debug!(session_id, order_type = %order.order_type, "Submitting order");
        let _: IgnoredAny = self
            .http
            .post(&format!("/api/orders/{}", session_id), order)
            .await?;
        Ok(())
    }
}
