//! Shared types for the Lakay storefront
//!
//! Wire and domain types used by both the backend client and the shop core:
//! dishes, cart line items, order payloads, payment intents and money helpers.

pub mod models;
pub mod money;

// Re-exports
pub use models::*;
pub use serde::{Deserialize, Serialize};
