//! Lakay Client - HTTP client for the storefront backend
//!
//! Provides typed access to the dish catalog, the session cart, payment
//! intents and order submission.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use api::StorefrontApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
