//! DOM implementations of the trigger's page seams.

use checkout_core::{CheckoutError, CheckoutResult, ClickHandler, Page, TriggerElement};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

/// The current document
#[derive(Debug, Clone)]
pub struct BrowserPage {
    document: Document,
}

impl BrowserPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Document of the global `window`
    pub fn current() -> CheckoutResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| CheckoutError::Page("No window object".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| CheckoutError::Page("No document object".to_string()))?;
        Ok(Self::new(document))
    }
}

impl Page for BrowserPage {
    type Element = BrowserElement;

    fn find_element(&self, id: &str) -> Option<BrowserElement> {
        self.document.get_element_by_id(id).map(BrowserElement)
    }
}

/// A DOM element the trigger binds to
#[derive(Debug, Clone)]
pub struct BrowserElement(Element);

impl BrowserElement {
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl TriggerElement for BrowserElement {
    fn on_click(&self, handler: ClickHandler) -> CheckoutResult<()> {
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            spawn_local(handler());
        });

        self.0
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(|e| CheckoutError::Page(format!("addEventListener failed: {:?}", e)))?;

        // Listener lives as long as the page
        listener.forget();
        Ok(())
    }
}

/// `window.location.origin`, the base URL of the checkout endpoints
pub fn page_origin() -> CheckoutResult<String> {
    web_sys::window()
        .ok_or_else(|| CheckoutError::Page("No window object".to_string()))?
        .location()
        .origin()
        .map_err(|e| CheckoutError::Page(format!("Cannot read location.origin: {:?}", e)))
}
