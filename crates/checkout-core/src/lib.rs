//! # checkout-core
//!
//! Core types and the checkout trigger for checkout-trigger-rs.
//!
//! This crate provides:
//! - `CheckoutTrigger` which arms the checkout button and runs the redirect flow
//! - `CheckoutBackend`, `PaymentProvider`/`PaymentClient` and `Page`/`TriggerElement`
//!   collaborator traits
//! - `HttpCheckoutBackend`, the reqwest implementation of the backend
//! - `ConfigResponse`, `CheckoutSessionResponse` and `RedirectOptions` wire types
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutTrigger, HttpCheckoutBackend, TriggerConfig};
//!
//! let backend = HttpCheckoutBackend::new(origin, TriggerConfig::default())?;
//! let trigger = CheckoutTrigger::new(backend, StripeJs, BrowserPage::current()?);
//!
//! // GET /config/ -> Stripe(publicKey) -> arm #submitBtn
//! trigger.initialize().await?;
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod ports;
pub mod session;
pub mod timestamp;
pub mod trigger;

// Re-exports for convenience
pub use backend::HttpCheckoutBackend;
pub use config::TriggerConfig;
pub use error::{CheckoutError, CheckoutResult};
pub use ports::{
    CheckoutBackend, ClickFuture, ClickHandler, Page, PaymentClient, PaymentProvider,
    TriggerElement,
};
pub use session::{CheckoutSessionResponse, ConfigResponse, ErrorBody, RedirectOptions};
pub use timestamp::parse_timestamp;
pub use trigger::{start_checkout, CheckoutTrigger, TriggerState};
