//! # Stripe.js Bindings
//!
//! wasm-bindgen bindings to the `Stripe` global loaded from
//! `https://js.stripe.com/v3/`, wrapped as a [`PaymentProvider`].

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, PaymentClient, PaymentProvider, RedirectOptions};
use js_sys::{Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

const PROVIDER: &str = "stripe";

#[wasm_bindgen]
extern "C" {
    /// Raw Stripe.js client handle.
    #[wasm_bindgen(js_name = Stripe)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// `Stripe(publishableKey)`; throws on an empty or malformed key.
    #[wasm_bindgen(catch, js_name = Stripe, js_namespace = window)]
    fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    /// `stripe.redirectToCheckout({ sessionId })` → JS `Promise`
    #[wasm_bindgen(method, catch, js_name = redirectToCheckout)]
    fn redirect_to_checkout(this: &JsStripe, options: &JsValue) -> Result<Promise, JsValue>;
}

/// Builds Stripe.js clients from the `window.Stripe` global
#[derive(Debug, Clone, Copy, Default)]
pub struct StripeJs;

impl PaymentProvider for StripeJs {
    type Client = StripeJsClient;

    fn construct(&self, public_key: &str) -> CheckoutResult<StripeJsClient> {
        let inner = new_stripe(public_key)
            .map_err(|e| CheckoutError::provider(PROVIDER, js_error_message(&e)))?;
        Ok(StripeJsClient { inner })
    }
}

/// A constructed Stripe.js client
#[derive(Debug, Clone)]
pub struct StripeJsClient {
    inner: JsStripe,
}

#[async_trait(?Send)]
impl PaymentClient for StripeJsClient {
    async fn redirect_to_checkout(&self, options: &RedirectOptions) -> CheckoutResult<()> {
        let options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| CheckoutError::Serialization(e.to_string()))?;

        let promise = self
            .inner
            .redirect_to_checkout(&options)
            .map_err(|e| CheckoutError::Redirect(js_error_message(&e)))?;

        let result = JsFuture::from(promise)
            .await
            .map_err(|e| CheckoutError::Redirect(js_error_message(&e)))?;

        // Stripe resolves with `{ error }` when it cannot navigate
        match Reflect::get(&result, &JsValue::from_str("error")) {
            Ok(error) if !error.is_undefined() && !error.is_null() => {
                Err(CheckoutError::Redirect(js_error_message(&error)))
            }
            _ => Ok(()),
        }
    }
}

/// Best-effort message out of a thrown value or a Stripe error object
fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
    {
        return message;
    }

    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
