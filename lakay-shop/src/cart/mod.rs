//! Cart state shared across views

mod store;
mod totals;

pub use store::CartStore;
pub use totals::CartTotals;
