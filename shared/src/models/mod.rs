//! Data models
//!
//! Field names follow the backend's camelCase JSON. All dish IDs are `i64`.

pub mod cart;
pub mod dish;
pub mod order;
pub mod payment;

// Re-exports
pub use cart::*;
pub use dish::*;
pub use order::*;
pub use payment::*;
