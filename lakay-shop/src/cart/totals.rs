//! Cart totals

use rust_decimal::Decimal;
use shared::CartLineItem;
use shared::money::{self, MoneyError};

/// Derived totals for a set of line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Σ quantity
    pub total_items: u32,
    /// Σ price × quantity, rounded to 2 decimals
    pub total_price: Decimal,
}

impl CartTotals {
    pub fn from_items(items: &[CartLineItem]) -> Self {
        let total_items = items.iter().map(|i| i.quantity).sum();
        let total_price = money::round(items.iter().map(CartLineItem::line_total).sum());
        Self {
            total_items,
            total_price,
        }
    }

    /// Amount handed to the payment provider, in minor units
    pub fn amount_minor_units(&self) -> Result<i64, MoneyError> {
        money::to_minor_units(self.total_price)
    }

    /// e.g. `Total: $31.97 (3 items)`
    pub fn summary(&self) -> String {
        format!(
            "Total: {} ({} items)",
            money::format(self.total_price),
            self.total_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_example_cart() {
        let items = vec![
            CartLineItem::new(1, "Griot", Decimal::new(1299, 2), 2),
            CartLineItem::new(6, "Bannan Peze", Decimal::new(599, 2), 1),
        ];
        let totals = CartTotals::from_items(&items);

        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price, Decimal::new(3197, 2));
        assert_eq!(totals.amount_minor_units(), Ok(3197));
        assert_eq!(totals.summary(), "Total: $31.97 (3 items)");
    }

    #[test]
    fn test_totals_empty_cart() {
        let totals = CartTotals::from_items(&[]);
        assert_eq!(totals, CartTotals::default());
        assert_eq!(totals.amount_minor_units(), Ok(0));
    }

    #[test]
    fn test_totals_round_sub_cent_prices() {
        // 0.335 × 3 = 1.005 -> 1.01
        let items = vec![CartLineItem::new(1, "Sample", Decimal::new(335, 3), 3)];
        let totals = CartTotals::from_items(&items);
        assert_eq!(totals.total_price, Decimal::new(101, 2));
        assert_eq!(totals.amount_minor_units(), Ok(101));
    }
}
