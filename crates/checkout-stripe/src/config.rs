//! # Stripe Configuration
//!
//! Configuration management for the server-side Stripe collaborator.
//! All secrets are loaded from environment variables.

use checkout_core::CheckoutError;
use std::env;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...), served by `/config/`
    pub publishable_key: String,

    /// Webhook signing secret (whsec_...)
    pub webhook_secret: String,

    /// Recurring price the subscription checkout sells (price_...)
    pub price_id: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    /// - `STRIPE_WEBHOOK_SECRET`
    /// - `STRIPE_PRICE_ID`
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok();

        let config = Self::new(
            required("STRIPE_SECRET_KEY")?,
            required("STRIPE_PUBLISHABLE_KEY")?,
            required("STRIPE_WEBHOOK_SECRET")?,
            required("STRIPE_PRICE_ID")?,
        );
        config.validate()?;

        Ok(config)
    }

    /// Create config with explicit values
    pub fn new(
        secret_key: impl Into<String>,
        publishable_key: impl Into<String>,
        webhook_secret: impl Into<String>,
        price_id: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            webhook_secret: webhook_secret.into(),
            price_id: price_id.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check key prefixes
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if !self.secret_key.starts_with("sk_test_") && !self.secret_key.starts_with("sk_live_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !self.publishable_key.starts_with("pk_test_")
            && !self.publishable_key.starts_with("pk_live_")
        {
            return Err(CheckoutError::Configuration(
                "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        if !self.webhook_secret.starts_with("whsec_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_WEBHOOK_SECRET must start with whsec_".to_string(),
            ));
        }

        if !self.price_id.starts_with("price_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_PRICE_ID must start with price_".to_string(),
            ));
        }

        // Mixing test and live keys is a guaranteed API failure
        if self.is_test_mode() != self.publishable_key.starts_with("pk_test_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY and STRIPE_PUBLISHABLE_KEY are from different modes".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

fn required(name: &str) -> Result<String, CheckoutError> {
    env::var(name).map_err(|_| CheckoutError::Configuration(format!("{} not set", name)))
}
