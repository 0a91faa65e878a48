//! # checkout-wasm
//!
//! Browser side of checkout-trigger-rs: arms the page's `#submitBtn` so a
//! click sends the visitor to Stripe's hosted checkout.
//!
//! On load the module:
//! 1. installs the panic hook and console logging
//! 2. fetches `/config/` and calls `Stripe(publicKey)`
//! 3. attaches a click listener to `#submitBtn`, if the page has one
//!
//! ## Usage (HTML)
//!
//! ```html
//! <script src="https://js.stripe.com/v3/"></script>
//! <button id="submitBtn">Subscribe</button>
//! <script type="module">
//!   import init from "/static/pkg/checkout_wasm.js";
//!   init();
//! </script>
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build crates/checkout-wasm --target web --out-dir ../../static/pkg
//! ```

pub mod dom;
pub mod logging;
pub mod stripe;

pub use dom::{page_origin, BrowserElement, BrowserPage};
pub use stripe::{JsStripe, StripeJs, StripeJsClient};

use checkout_core::{
    CheckoutResult, CheckoutTrigger, HttpCheckoutBackend, TriggerConfig, TriggerState,
};
use tracing::{debug, error, info, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Module entry point (called automatically on load)
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(Level::INFO);

    info!("Checkout script loaded");

    spawn_local(async {
        match arm_checkout(TriggerConfig::default()).await {
            Ok(state) => debug!("Checkout trigger {:?}", state),
            Err(e) => debug!("Checkout trigger not armed: {}", e),
        }
    });
}

/// Build the trigger for the current page and run `initialize()`.
pub async fn arm_checkout(config: TriggerConfig) -> CheckoutResult<TriggerState> {
    let page = BrowserPage::current().map_err(|e| {
        error!("Checkout trigger setup failed: {}", e);
        e
    })?;
    let backend = page_origin()
        .and_then(|origin| HttpCheckoutBackend::new(origin, config.clone()))
        .map_err(|e| {
            error!("Checkout trigger setup failed: {}", e);
            e
        })?;

    CheckoutTrigger::new(backend, StripeJs, page)
        .with_config(config)
        .initialize()
        .await
}

/// Arm a button other than `#submitBtn`; resolves to `true` when a listener was attached
#[wasm_bindgen(js_name = armCheckout)]
pub async fn arm_checkout_js(button_id: String) -> bool {
    let config = TriggerConfig::new().with_button_id(button_id);
    matches!(arm_checkout(config).await, Ok(TriggerState::Armed))
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
