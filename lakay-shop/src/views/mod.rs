//! Views over the backend: menu and cart
//!
//! A view owns a [`ViewScope`]; tearing the view down cancels whatever request
//! it still has in flight, so a stale response never lands in the cart store.

mod cart;
mod menu;
mod scope;

pub use cart::CartView;
pub use menu::MenuView;
pub use scope::ViewScope;
