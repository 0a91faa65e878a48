//! # Application State
//!
//! Shared state for the Axum application: server config, the Stripe
//! session client and the webhook handler.

use checkout_stripe::{LoggingWebhookHandler, StripeSessionClient, WebhookHandler};
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public URL of this server, used for Stripe's success/cancel redirects
    pub domain_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Directory served under `/static` (holds the built wasm package)
    pub static_dir: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            domain_url: std::env::var("DOMAIN_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Stripe success URL; Stripe substitutes `{CHECKOUT_SESSION_ID}`
    pub fn success_url(&self) -> String {
        format!(
            "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
            self.domain_url.trim_end_matches('/')
        )
    }

    /// Stripe cancel URL
    pub fn cancel_url(&self) -> String {
        format!("{}/cancel/", self.domain_url.trim_end_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Stripe Checkout Sessions client
    pub stripe: StripeSessionClient,
    /// Receives verified webhook events
    pub webhook_handler: Arc<dyn WebhookHandler>,
}

impl AppState {
    /// Create state from the environment
    pub fn new() -> anyhow::Result<Self> {
        let stripe = StripeSessionClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_parts(AppConfig::from_env(), stripe))
    }

    /// Create state from explicit parts
    pub fn with_parts(config: AppConfig, stripe: StripeSessionClient) -> Self {
        Self {
            config,
            stripe,
            webhook_handler: Arc::new(LoggingWebhookHandler),
        }
    }

    /// Builder: replace the webhook handler
    pub fn with_webhook_handler(mut self, handler: Arc<dyn WebhookHandler>) -> Self {
        self.webhook_handler = handler;
        self
    }
}
