//! # checkout-stripe
//!
//! Server-side Stripe collaborator for checkout-trigger-rs.
//!
//! - **StripeSessionClient** creates the subscription Checkout Session
//!   whose id `/create-checkout-session/` returns to the browser
//! - **verify_webhook** checks `Stripe-Signature` and parses the event
//!   posted to `/webhook/`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripeSessionClient;
//!
//! let client = StripeSessionClient::from_env()?;
//! let session = client.create_subscription_session(
//!     None,
//!     "https://example.com/success?session_id={CHECKOUT_SESSION_ID}",
//!     "https://example.com/cancel/",
//! ).await?;
//!
//! // Return session.id to the browser as {"sessionId": ...}
//! ```

pub mod config;
pub mod session;
pub mod webhook;

// Re-exports
pub use config::StripeConfig;
pub use session::{StripeSession, StripeSessionClient};
pub use webhook::{
    compute_signature, dispatch_webhook_event, verify_webhook, LoggingWebhookHandler,
    SubscriptionCompleted, WebhookEvent, WebhookEventType, WebhookHandler,
};
