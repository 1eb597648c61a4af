use std::path::PathBuf;

use lakay_client::ClientConfig;

use crate::error::{ShopError, ShopResult};
use crate::payment::StripeConfirmer;

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | API_BASE_URL | http://localhost:8082 | Storefront backend |
/// | REQUEST_TIMEOUT_SECS | 30 | Backend request timeout |
/// | CURRENCY | usd | Currency sent with payment intents |
/// | STRIPE_PUBLISHABLE_KEY | (unset) | Enables payment confirmation |
/// | STRIPE_API_BASE | https://api.stripe.com | Payment provider API |
/// | PAYMENT_RETURN_URL | (unset) | Return page after off-site authentication |
/// | WORK_DIR | .lakay | Session file and logs |
/// | LOG_LEVEL | info | Default log filter when `RUST_LOG` is unset |
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub currency: String,
    pub stripe_publishable_key: Option<String>,
    pub stripe_api_base: String,
    pub payment_return_url: Option<String>,
    pub work_dir: PathBuf,
    pub log_level: String,
}

impl ShopConfig {
    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_base_url: non_empty("API_BASE_URL")
                .unwrap_or_else(|| lakay_client::config::DEFAULT_BASE_URL.into()),
            request_timeout_secs: non_empty("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            currency: non_empty("CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|| "usd".into()),
            stripe_publishable_key: non_empty("STRIPE_PUBLISHABLE_KEY"),
            stripe_api_base: non_empty("STRIPE_API_BASE")
                .unwrap_or_else(|| crate::payment::stripe::DEFAULT_API_BASE.into()),
            payment_return_url: non_empty("PAYMENT_RETURN_URL"),
            work_dir: non_empty("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".lakay")),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.clone()).with_timeout(self.request_timeout_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.work_dir.join("logs")
    }

    /// Stripe confirmer for the configured account and the given card reference
    pub fn stripe_confirmer(&self, card_token: impl Into<String>) -> ShopResult<StripeConfirmer> {
        let key = self
            .stripe_publishable_key
            .clone()
            .ok_or_else(|| ShopError::Config("STRIPE_PUBLISHABLE_KEY is not set".into()))?;
        let mut confirmer =
            StripeConfirmer::new(key, card_token).with_api_base(self.stripe_api_base.clone());
        if let Some(url) = &self.payment_return_url {
            confirmer = confirmer.with_return_url(url.clone());
        }
        Ok(confirmer)
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8082");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.currency, "usd");
        assert_eq!(config.stripe_api_base, "https://api.stripe.com");
        assert_eq!(config.work_dir, PathBuf::from(".lakay"));
        assert_eq!(config.log_dir(), PathBuf::from(".lakay/logs"));
        assert!(config.stripe_publishable_key.is_none());
        assert!(matches!(
            config.stripe_confirmer("tok_visa"),
            Err(ShopError::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("API_BASE_URL", "https://lakay.example.com"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("CURRENCY", "HTG"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_abc"),
            ("WORK_DIR", "/tmp/lakay"),
            ("LOG_LEVEL", "debug"),
        ]);
        let config = ShopConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.currency, "htg");
        assert_eq!(config.log_level, "debug");
        let client = config.client_config();
        assert_eq!(client.base_url, "https://lakay.example.com");
        assert_eq!(client.timeout, 5);
        assert!(config.stripe_confirmer("tok_visa").is_ok());
    }

    #[test]
    fn test_card_token_is_supplied_per_checkout() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_abc"),
            ("STRIPE_API_BASE", "http://127.0.0.1:12111/"),
        ]);
        let config = ShopConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        let confirmer = format!("{:?}", config.stripe_confirmer("tok_amex").unwrap());
        assert!(confirmer.contains("tok_amex"));
        assert!(confirmer.contains("http://127.0.0.1:12111"));
    }

    #[test]
    fn test_bad_and_blank_values_fall_back() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("REQUEST_TIMEOUT_SECS", "soon"), ("API_BASE_URL", "  ")]);
        let config = ShopConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.api_base_url, "http://localhost:8082");
    }
}
