//! # Collaborator Traits
//!
//! Everything the checkout trigger talks to is injected through these
//! traits: the two server endpoints, the third-party payment client and the
//! page hosting the button.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       CheckoutTrigger                        │
//! └──────┬──────────────────┬──────────────────────┬─────────────┘
//!        │                  │                      │
//! ┌──────┴────────┐ ┌───────┴─────────┐ ┌──────────┴──────────┐
//! │CheckoutBackend│ │ PaymentProvider │ │ Page/TriggerElement │
//! │ (HTTP, mocks) │ │ → PaymentClient │ │ (DOM, fakes)        │
//! └───────────────┘ └─────────────────┘ └─────────────────────┘
//! ```
//!
//! The async traits are `?Send`: in the browser every future lives on the
//! single event-loop thread.

use crate::error::CheckoutResult;
use crate::session::{CheckoutSessionResponse, ConfigResponse, RedirectOptions};
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// Server endpoints consumed by the trigger.
#[async_trait(?Send)]
pub trait CheckoutBackend {
    /// `GET /config/`
    async fn fetch_config(&self) -> CheckoutResult<ConfigResponse>;

    /// `GET /create-checkout-session/`
    async fn create_checkout_session(&self) -> CheckoutResult<CheckoutSessionResponse>;
}

/// Third-party client holding the hosted-checkout redirect capability.
#[async_trait(?Send)]
pub trait PaymentClient {
    /// Navigate to the hosted checkout page for `options.session_id`.
    ///
    /// On success the browser leaves the page, so `Ok` is rarely observed.
    async fn redirect_to_checkout(&self, options: &RedirectOptions) -> CheckoutResult<()>;
}

/// Builds a [`PaymentClient`] from a publishable key.
pub trait PaymentProvider {
    type Client: PaymentClient + 'static;

    fn construct(&self, public_key: &str) -> CheckoutResult<Self::Client>;
}

/// Future returned by a click handler
pub type ClickFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Listener attached to the trigger element.
///
/// The platform decides how the returned future is driven
/// (`spawn_local` in the browser, awaited directly in tests).
pub type ClickHandler = Box<dyn Fn() -> ClickFuture>;

/// Page hosting the trigger element.
pub trait Page {
    type Element: TriggerElement;

    fn find_element(&self, id: &str) -> Option<Self::Element>;
}

/// An element that can be activated by the user.
pub trait TriggerElement {
    /// Register `handler` for every activation of the element.
    fn on_click(&self, handler: ClickHandler) -> CheckoutResult<()>;
}
