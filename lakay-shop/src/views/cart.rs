//! Cart view: server reconciliation, quantity edits and removal
//!
//! Every mutation follows mutate-then-resync: the change is sent to the
//! backend and, once accepted, the whole cart is fetched again and replaces the
//! local copy. The local store is never edited optimistically here.

use lakay_client::{HttpClient, NetworkHttpClient, StorefrontApi};
use shared::{CartLineItem, OrderType};

use super::ViewScope;
use crate::cart::{CartStore, CartTotals};
use crate::checkout::Checkout;
use crate::error::{ShopError, ShopResult};
use crate::payment::PaymentConfirmer;
use crate::session::SessionProvider;

const FETCH_FAILED: &str = "Failed to load your cart. Please refresh the page.";
const UPDATE_FAILED: &str = "Failed to update quantity. Please try again.";
const REMOVE_FAILED: &str = "Failed to remove item. Please try again.";

/// Current cart contents, kept in step with the backend
pub struct CartView<H = NetworkHttpClient> {
    api: StorefrontApi<H>,
    cart: CartStore,
    session: SessionProvider,
    scope: ViewScope,
    error: Option<String>,
}

impl<H: HttpClient> CartView<H> {
    pub fn new(
        api: StorefrontApi<H>,
        cart: CartStore,
        session: SessionProvider,
        scope: ViewScope,
    ) -> Self {
        Self {
            api,
            cart,
            session,
            scope,
            error: None,
        }
    }

    /// Initial load; same as [`sync`](Self::sync)
    pub async fn mount(&mut self) -> ShopResult<()> {
        self.sync().await
    }

    /// Fetch the authoritative cart and replace the local one with it
    pub async fn sync(&mut self) -> ShopResult<()> {
        let session_id = self.session.session_id();
        let fetched = self.scope.run(self.api.get_cart(session_id)).await;
        match fetched {
            Ok(entries) => {
                tracing::debug!(session_id, lines = entries.len(), "Cart fetched");
                self.cart
                    .replace_cart(entries.into_iter().map(CartLineItem::from));
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.record(e, FETCH_FAILED)),
        }
    }

    /// Switch to another session and re-sync when the id actually changed
    pub async fn set_session(&mut self, session: SessionProvider) -> ShopResult<()> {
        if session == self.session {
            return Ok(());
        }
        tracing::info!(from = %self.session, to = %session, "Session changed");
        self.session = session;
        self.sync().await
    }

    /// Set a line's quantity (clamped to at least 1), then re-sync
    pub async fn update_quantity(&mut self, dish_id: i64, quantity: u32) -> ShopResult<()> {
        let quantity = quantity.max(1);
        let result = self
            .scope
            .run(
                self.api
                    .update_cart_item(self.session.session_id(), dish_id, quantity),
            )
            .await;
        if let Err(e) = result {
            return Err(self.record(e, UPDATE_FAILED));
        }
        self.sync().await
    }

    /// Remove a line, then re-sync
    pub async fn remove(&mut self, dish_id: i64) -> ShopResult<()> {
        let result = self
            .scope
            .run(self.api.remove_from_cart(self.session.session_id(), dish_id))
            .await;
        if let Err(e) = result {
            return Err(self.record(e, REMOVE_FAILED));
        }
        self.sync().await
    }

    fn record(&mut self, err: ShopError, fallback: &str) -> ShopError {
        if !err.is_cancelled() {
            tracing::error!(session_id = %self.session, error = %err, "{}", fallback);
            self.error = Some(err.user_message(fallback));
        }
        err
    }

    pub fn items(&self) -> Vec<CartLineItem> {
        self.cart.items()
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn set_order_type(&self, order_type: OrderType) {
        self.cart.set_order_type(order_type);
    }

    pub fn order_type(&self) -> OrderType {
        self.cart.order_type()
    }

    /// Last user-visible error, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn session(&self) -> &SessionProvider {
        &self.session
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Cancel any in-flight request
    pub fn teardown(&self) {
        self.scope.cancel();
    }
}

impl<H: HttpClient + Clone> CartView<H> {
    /// Checkout hosted by this view, sharing its cart, session and lifetime
    pub fn checkout<P: PaymentConfirmer>(
        &self,
        confirmer: P,
        currency: impl Into<String>,
    ) -> Checkout<H, P> {
        Checkout::new(
            self.api.clone(),
            self.cart.clone(),
            self.session.clone(),
            confirmer,
            currency,
            self.scope.child(),
        )
    }
}

impl<H> Drop for CartView<H> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
