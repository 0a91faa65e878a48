//! # Stripe Checkout Sessions
//!
//! Creates the subscription Checkout Session whose id the browser trigger
//! hands to `stripe.redirectToCheckout`.

use crate::config::StripeConfig;
use checkout_core::timestamp::from_unix;
use checkout_core::{CheckoutError, CheckoutResult};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// A created Checkout Session
#[derive(Debug, Clone, PartialEq)]
pub struct StripeSession {
    /// Session id (cs_...)
    pub id: String,
    /// Hosted checkout URL
    pub url: Option<String>,
    /// When the session stops accepting payment
    pub expires_at: Option<DateTime<Utc>>,
}

/// Client for the Stripe Checkout Sessions API
#[derive(Debug, Clone)]
pub struct StripeSessionClient {
    config: StripeConfig,
    client: Client,
}

impl StripeSessionClient {
    /// Create a new session client
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Form body for a one-seat subscription to the configured price
    fn session_form(
        &self,
        client_reference_id: Option<&str>,
        success_url: &str,
        cancel_url: &str,
    ) -> Vec<(String, String)> {
        let mut form = vec![
            ("mode".to_string(), "subscription".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("line_items[0][price]".to_string(), self.config.price_id.clone()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        if let Some(reference) = client_reference_id {
            form.push(("client_reference_id".to_string(), reference.to_string()));
        }

        form
    }

    /// Create a subscription Checkout Session.
    ///
    /// `success_url` may contain Stripe's `{CHECKOUT_SESSION_ID}` placeholder.
    #[instrument(skip(self, success_url, cancel_url))]
    pub async fn create_subscription_session(
        &self,
        client_reference_id: Option<&str>,
        success_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<StripeSession> {
        let form = self.session_form(client_reference_id, success_url, cancel_url);
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let idempotency_key = Uuid::new_v4().to_string();

        debug!(
            "Creating Stripe checkout session: price={}, key={}",
            self.config.price_id, idempotency_key
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::provider(PROVIDER, error_response.error.message));
            }

            return Err(CheckoutError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        let session: StripeSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        let expires_at = session.expires_at.and_then(from_unix);

        info!(
            "Created Stripe checkout session: id={}, expires_at={}",
            session.id,
            expires_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string())
        );

        Ok(StripeSession {
            id: session.id,
            url: session.url,
            expires_at,
        })
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
