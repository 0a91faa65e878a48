//! # Checkout Error Types
//!
//! Typed error handling shared by the trigger, the Stripe collaborator and
//! the server. All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network/HTTP transport error (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Serialization/deserialization error (bad JSON, missing field)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Payment provider error (client construction, API error body)
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Hosted checkout redirect was rejected
    #[error("Redirect to checkout failed: {0}")]
    Redirect(String),

    /// Page/DOM binding error
    #[error("Page error: {0}")]
    Page(String),

    /// Webhook signature verification failed
    #[error("Webhook verification failed: {0}")]
    WebhookVerificationFailed(String),

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParseError(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Shorthand for a provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Network(_) => 503,
            CheckoutError::Http { .. } => 502,
            CheckoutError::Serialization(_) => 500,
            CheckoutError::Provider { .. } => 502,
            CheckoutError::Redirect(_) => 500,
            CheckoutError::Page(_) => 500,
            CheckoutError::WebhookVerificationFailed(_) => 400,
            CheckoutError::WebhookParseError(_) => 400,
            CheckoutError::Internal(_) => 500,
        }
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CheckoutError::Serialization(err.to_string())
        } else {
            CheckoutError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Serialization(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
