//! In-memory cart store
//!
//! `CartStore` is a cheap, cloneable handle. Views receive a clone at
//! construction time instead of reaching for global state; every clone sees the
//! same cart.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{CartLineItem, OrderType};

use super::CartTotals;

#[derive(Debug, Default)]
struct CartState {
    items: Vec<CartLineItem>,
    order_type: OrderType,
}

impl CartState {
    /// Merge by `dish_id`, keeping insertion order
    fn merge(&mut self, mut item: CartLineItem) {
        item.quantity = item.quantity.max(1);
        match self.items.iter_mut().find(|i| i.dish_id == item.dish_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }
}

/// Shared cart handle: line items plus the selected order type
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    inner: Arc<RwLock<CartState>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a confirmed item; an existing line for the same dish absorbs the quantity
    pub fn add_item(&self, item: CartLineItem) {
        tracing::debug!(dish_id = item.dish_id, quantity = item.quantity, "Cart add");
        self.inner.write().merge(item);
    }

    /// Replace the local cart with the server's view of it
    ///
    /// Duplicate dishes are merged and zero quantities dropped so the store
    /// invariants hold whatever the server sends.
    pub fn replace_cart(&self, items: impl IntoIterator<Item = CartLineItem>) {
        let mut state = self.inner.write();
        state.items.clear();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            state.merge(item);
        }
        tracing::debug!(lines = state.items.len(), "Cart replaced");
    }

    /// Drop the line for `dish_id`; no-op when absent
    pub fn remove_item(&self, dish_id: i64) {
        tracing::debug!(dish_id, "Cart remove");
        self.inner.write().items.retain(|i| i.dish_id != dish_id);
    }

    pub fn clear(&self) {
        tracing::debug!("Cart cleared");
        self.inner.write().items.clear();
    }

    pub fn set_order_type(&self, order_type: OrderType) {
        tracing::debug!(%order_type, "Order type selected");
        self.inner.write().order_type = order_type;
    }

    pub fn order_type(&self) -> OrderType {
        self.inner.read().order_type
    }

    /// Snapshot of the current line items
    pub fn items(&self) -> Vec<CartLineItem> {
        self.inner.read().items.clone()
    }

    pub fn get(&self, dish_id: i64) -> Option<CartLineItem> {
        self.inner
            .read()
            .items
            .iter()
            .find(|i| i.dish_id == dish_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.inner.read().items)
    }
}
