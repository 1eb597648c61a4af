//! Lakay Shop - storefront core
//!
//! Session identity, the shared cart store, menu and cart views and the
//! checkout flow, all talking to the backend through [`lakay_client`].

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod logger;
pub mod payment;
pub mod session;
pub mod views;

pub use cart::{CartStore, CartTotals};
pub use checkout::{Checkout, CheckoutState, ValidatedOrder};
pub use config::ShopConfig;
pub use error::{FieldError, FieldErrors, ShopError, ShopResult};
pub use payment::{BillingDetails, PaymentConfirmation, PaymentConfirmer, PaymentError, StripeConfirmer};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionProvider, SessionStorage};
pub use views::{CartView, MenuView, ViewScope};
