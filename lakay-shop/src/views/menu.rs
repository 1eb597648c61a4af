//! Menu view: dish catalog and add-to-cart

use std::collections::HashMap;

use lakay_client::{HttpClient, NetworkHttpClient, StorefrontApi};
use shared::{CartLineItem, Dish};

use super::ViewScope;
use crate::cart::CartStore;
use crate::error::{ShopError, ShopResult};
use crate::session::SessionProvider;

/// Number of dishes highlighted on the landing page
pub const FEATURED_COUNT: usize = 3;

const LOAD_FAILED: &str = "Failed to load the menu. Please refresh the page.";
const ADD_FAILED: &str = "Failed to add item to cart. Please try again.";

/// Dish catalog plus per-dish quantity pickers
pub struct MenuView<H = NetworkHttpClient> {
    api: StorefrontApi<H>,
    cart: CartStore,
    session: SessionProvider,
    scope: ViewScope,
    dishes: Vec<Dish>,
    quantities: HashMap<i64, u32>,
    error: Option<String>,
}

impl<H: HttpClient> MenuView<H> {
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
            dishes: Vec::new(),
            quantities: HashMap::new(),
            error: None,
        }
    }

    /// Fetch the catalog
    ///
    /// On failure the catalog is left empty and a user-visible error is
    /// recorded. There is no retry.
    pub async fn load(&mut self) -> ShopResult<&[Dish]> {
        match self.scope.run(self.api.list_dishes()).await {
            Ok(dishes) => {
                tracing::info!(count = dishes.len(), "Menu loaded");
                self.dishes = dishes;
                self.error = None;
                Ok(&self.dishes)
            }
            Err(ShopError::Cancelled) => Err(ShopError::Cancelled),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load menu");
                self.dishes.clear();
                self.error = Some(e.user_message(LOAD_FAILED));
                Err(e)
            }
        }
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Landing-page highlights
    pub fn featured(&self) -> &[Dish] {
        &self.dishes[..self.dishes.len().min(FEATURED_COUNT)]
    }

    /// Update the quantity picker from raw input; anything below 1 or unparsable becomes 1
    ///
    /// Leading digits are read and the rest ignored, so `"2.7"` and `"3 plates"` pick 2 and 3.
    pub fn set_quantity(&mut self, dish_id: i64, raw: &str) -> u32 {
        let quantity = parse_quantity(raw);
        self.quantities.insert(dish_id, quantity);
        quantity
    }

    pub fn quantity_for(&self, dish_id: i64) -> u32 {
        self.quantities.get(&dish_id).copied().unwrap_or(1)
    }

    /// Add the picked quantity of a dish
    ///
    /// The server is asked first; the local store only changes once it has
    /// confirmed, so the cart never runs ahead of the server on additions.
    pub async fn add_to_cart(&mut self, dish_id: i64) -> ShopResult<()> {
        let dish = self
            .dishes
            .iter()
            .find(|d| d.id == dish_id)
            .cloned()
            .ok_or(ShopError::UnknownDish(dish_id))?;
        let quantity = self.quantity_for(dish_id);

        let result = self
            .scope
            .run(
                self.api
                    .add_to_cart(self.session.session_id(), dish_id, quantity),
            )
            .await;

        match result {
            Ok(()) => {
                self.cart
                    .add_item(CartLineItem::new(dish.id, dish.name, dish.price, quantity));
                self.quantities.insert(dish_id, 1);
                self.error = None;
                tracing::info!(dish_id, quantity, "Added to cart");
                Ok(())
            }
            Err(ShopError::Cancelled) => Err(ShopError::Cancelled),
            Err(e) => {
                tracing::error!(dish_id, error = %e, "Failed to add to cart");
                self.error = Some(e.user_message(ADD_FAILED));
                Err(e)
            }
        }
    }

    /// Last user-visible error, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Cancel any in-flight request
    pub fn teardown(&self) {
        self.scope.cancel();
    }
}

fn parse_quantity(raw: &str) -> u32 {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    match &raw[..end] {
        "" => 1,
        digits => digits.parse::<u32>().unwrap_or(u32::MAX).max(1),
    }
}

impl<H> Drop for MenuView<H> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
