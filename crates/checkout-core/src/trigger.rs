//! # Checkout Trigger
//!
//! Wires the button on the page to the hosted checkout flow:
//!
//! ```text
//! initialize():      GET /config/ ──▶ construct client ──▶ find #submitBtn ──▶ attach listener
//! start_checkout():  GET /create-checkout-session/ ──▶ client.redirect_to_checkout({ sessionId })
//! ```
//!
//! Failures are logged and returned, never panicked on. A failed
//! `initialize()` leaves the button without a listener.
//!
//! There is no single-flight guard: two clicks issue two session requests
//! and two redirects, in no guaranteed order.

use crate::config::TriggerConfig;
use crate::error::CheckoutResult;
use crate::ports::{
    CheckoutBackend, ClickFuture, Page, PaymentClient, PaymentProvider, TriggerElement,
};
use crate::session::RedirectOptions;
use std::rc::Rc;
use tracing::{debug, error, info, instrument};

/// Outcome of [`CheckoutTrigger::initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Click listener attached to the button
    Armed,
    /// No button on this page; nothing was attached
    Inert,
}

/// The checkout trigger component.
pub struct CheckoutTrigger<B, P, D> {
    backend: Rc<B>,
    provider: P,
    page: D,
    config: TriggerConfig,
}

impl<B, P, D> CheckoutTrigger<B, P, D>
where
    B: CheckoutBackend + 'static,
    P: PaymentProvider,
    D: Page,
{
    pub fn new(backend: B, provider: P, page: D) -> Self {
        Self {
            backend: Rc::new(backend),
            provider,
            page,
            config: TriggerConfig::default(),
        }
    }

    /// Builder: override the default config
    pub fn with_config(mut self, config: TriggerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Fetch the publishable key, build the payment client and arm the button.
    #[instrument(skip(self), fields(button_id = %self.config.button_id))]
    pub async fn initialize(&self) -> CheckoutResult<TriggerState> {
        let config = self.backend.fetch_config().await.map_err(|e| {
            error!("Failed to load checkout configuration: {}", e);
            e
        })?;

        let client = self.provider.construct(&config.public_key).map_err(|e| {
            error!("Failed to initialize payment client: {}", e);
            e
        })?;
        info!("Payment client initialized");

        let Some(button) = self.page.find_element(&self.config.button_id) else {
            debug!("No #{} element on page, checkout trigger inert", self.config.button_id);
            return Ok(TriggerState::Inert);
        };

        let backend = Rc::clone(&self.backend);
        let client = Rc::new(client);
        button.on_click(Box::new(move || -> ClickFuture {
            let backend = Rc::clone(&backend);
            let client = Rc::clone(&client);
            Box::pin(async move {
                // logged inside
                let _ = start_checkout(&*backend, &*client).await;
            })
        }))
        .map_err(|e| {
            error!("Failed to attach checkout listener: {}", e);
            e
        })?;

        debug!("Checkout listener attached");
        Ok(TriggerState::Armed)
    }

    /// Request a session and redirect with `client`.
    pub async fn start_checkout(&self, client: &P::Client) -> CheckoutResult<()> {
        start_checkout(&*self.backend, client).await
    }
}

/// Request a checkout session from `backend` and hand it to `client`.
///
/// Any failure is logged at error level and returned.
pub async fn start_checkout<B, C>(backend: &B, client: &C) -> CheckoutResult<()>
where
    B: CheckoutBackend + ?Sized,
    C: PaymentClient + ?Sized,
{
    let result = async {
        let session = backend.create_checkout_session().await?;
        info!(session_id = %session.session_id, "Checkout session data: {:?}", session);

        client
            .redirect_to_checkout(&RedirectOptions::from(session))
            .await
    }
    .await;

    if let Err(ref e) = result {
        error!("Checkout failed: {}", e);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use crate::ports::ClickHandler;
    use crate::session::{CheckoutSessionResponse, ConfigResponse};
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::subscriber::DefaultGuard;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output for assertions
    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl LogCapture {
        fn install(&self) -> DefaultGuard {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(self.clone())
                .with_max_level(Level::DEBUG)
                .with_ansi(false)
                .without_time()
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn lines(&self) -> Vec<String> {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf)
                .lines()
                .map(String::from)
                .collect()
        }

        fn has_line(&self, level: &str, message: &str) -> bool {
            self.lines()
                .iter()
                .any(|line| line.contains(level) && line.contains(message))
        }
    }

    impl io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogCapture {
        type Writer = LogCapture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        config: Option<ConfigResponse>,
        session: Option<CheckoutSessionResponse>,
        session_calls: Cell<usize>,
        in_flight: Cell<usize>,
        max_in_flight: Cell<usize>,
    }

    impl FakeBackend {
        fn ok(public_key: &str, session_id: &str) -> Self {
            Self {
                config: Some(ConfigResponse::new(public_key)),
                session: Some(CheckoutSessionResponse::new(session_id)),
                ..Default::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl CheckoutBackend for FakeBackend {
        async fn fetch_config(&self) -> CheckoutResult<ConfigResponse> {
            self.config
                .clone()
                .ok_or_else(|| CheckoutError::Network("connection refused".into()))
        }

        async fn create_checkout_session(&self) -> CheckoutResult<CheckoutSessionResponse> {
            self.session_calls.set(self.session_calls.get() + 1);
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight.set(self.max_in_flight.get().max(self.in_flight.get()));
            tokio::task::yield_now().await;
            self.in_flight.set(self.in_flight.get() - 1);

            self.session.clone().ok_or_else(|| CheckoutError::Http {
                status: 500,
                body: "Internal Server Error".into(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        keys: Rc<RefCell<Vec<String>>>,
        redirects: Rc<RefCell<Vec<RedirectOptions>>>,
    }

    struct FakeProvider {
        recorder: Recorder,
        reject_redirect: bool,
    }

    struct FakeClient {
        recorder: Recorder,
        reject_redirect: bool,
    }

    impl PaymentProvider for FakeProvider {
        type Client = FakeClient;

        fn construct(&self, public_key: &str) -> CheckoutResult<FakeClient> {
            if public_key.is_empty() {
                return Err(CheckoutError::provider("fake", "empty key"));
            }
            self.recorder.keys.borrow_mut().push(public_key.to_string());
            Ok(FakeClient {
                recorder: self.recorder.clone(),
                reject_redirect: self.reject_redirect,
            })
        }
    }

    #[async_trait(?Send)]
    impl PaymentClient for FakeClient {
        async fn redirect_to_checkout(&self, options: &RedirectOptions) -> CheckoutResult<()> {
            if self.reject_redirect {
                return Err(CheckoutError::Redirect("network down".into()));
            }
            self.recorder.redirects.borrow_mut().push(options.clone());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct FakeElement {
        handlers: Rc<RefCell<Vec<ClickHandler>>>,
    }

    impl FakeElement {
        fn listener_count(&self) -> usize {
            self.handlers.borrow().len()
        }

        /// Start every listener without driving it
        fn press(&self) -> Vec<ClickFuture> {
            self.handlers.borrow().iter().map(|h| h()).collect()
        }

        async fn click(&self) {
            for fut in self.press() {
                fut.await;
            }
        }
    }

    impl TriggerElement for FakeElement {
        fn on_click(&self, handler: ClickHandler) -> CheckoutResult<()> {
            self.handlers.borrow_mut().push(handler);
            Ok(())
        }
    }

    struct FakePage {
        id: &'static str,
        element: FakeElement,
    }

    impl Page for FakePage {
        type Element = FakeElement;

        fn find_element(&self, id: &str) -> Option<FakeElement> {
            (id == self.id).then(|| self.element.clone())
        }
    }

    fn setup(
        backend: FakeBackend,
        page_id: &'static str,
        reject_redirect: bool,
    ) -> (
        CheckoutTrigger<FakeBackend, FakeProvider, FakePage>,
        Recorder,
        FakeElement,
    ) {
        let recorder = Recorder::default();
        let element = FakeElement::default();
        let trigger = CheckoutTrigger::new(
            backend,
            FakeProvider {
                recorder: recorder.clone(),
                reject_redirect,
            },
            FakePage {
                id: page_id,
                element: element.clone(),
            },
        );
        (trigger, recorder, element)
    }

    #[tokio::test]
    async fn test_client_constructed_with_fetched_key() {
        let (trigger, recorder, element) =
            setup(FakeBackend::ok("pk_test_1", "cs_123"), "submitBtn", false);

        let state = trigger.initialize().await.unwrap();

        assert_eq!(state, TriggerState::Armed);
        assert_eq!(*recorder.keys.borrow(), vec!["pk_test_1".to_string()]);
        assert_eq!(element.listener_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_button_is_inert() {
        let (trigger, recorder, element) =
            setup(FakeBackend::ok("pk_test_1", "cs_123"), "otherBtn", false);

        let state = trigger.initialize().await.unwrap();

        assert_eq!(state, TriggerState::Inert);
        assert_eq!(element.listener_count(), 0);
        // the client is still built before the lookup
        assert_eq!(recorder.keys.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_config_failure_leaves_button_inert() {
        let backend = FakeBackend {
            session: Some(CheckoutSessionResponse::new("cs_123")),
            ..Default::default()
        };
        let (trigger, recorder, element) = setup(backend, "submitBtn", false);
        let logs = LogCapture::default();
        let _guard = logs.install();

        let err = trigger.initialize().await.unwrap_err();

        assert!(matches!(err, CheckoutError::Network(_)));
        assert!(recorder.keys.borrow().is_empty());
        assert_eq!(element.listener_count(), 0);
        assert!(logs.has_line(
            "ERROR",
            "Failed to load checkout configuration: Network error: connection refused"
        ));
    }

    #[tokio::test]
    async fn test_construct_failure_leaves_button_inert() {
        let (trigger, _recorder, element) =
            setup(FakeBackend::ok("", "cs_123"), "submitBtn", false);

        let err = trigger.initialize().await.unwrap_err();

        assert!(matches!(err, CheckoutError::Provider { .. }));
        assert_eq!(element.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_click_redirects_with_session_id() {
        let (trigger, recorder, element) =
            setup(FakeBackend::ok("pk_test_1", "cs_123"), "submitBtn", false);
        trigger.initialize().await.unwrap();
        let logs = LogCapture::default();
        let _guard = logs.install();

        element.click().await;

        assert_eq!(
            *recorder.redirects.borrow(),
            vec![RedirectOptions {
                session_id: "cs_123".into()
            }]
        );
        assert!(logs.has_line("INFO", "Checkout session data"));
        assert!(logs.has_line("INFO", "cs_123"));
    }

    #[tokio::test]
    async fn test_session_failure_does_not_redirect() {
        let backend = FakeBackend {
            config: Some(ConfigResponse::new("pk_test_1")),
            ..Default::default()
        };
        let (trigger, recorder, element) = setup(backend, "submitBtn", false);
        trigger.initialize().await.unwrap();
        let logs = LogCapture::default();
        let _guard = logs.install();

        // swallowed by the listener
        element.click().await;
        assert!(recorder.redirects.borrow().is_empty());
        assert!(logs.has_line("ERROR", "Checkout failed: HTTP 500: Internal Server Error"));

        let client = FakeProvider {
            recorder: recorder.clone(),
            reject_redirect: false,
        }
        .construct("pk_test_1")
        .unwrap();
        let err = trigger.start_checkout(&client).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Http { status: 500, .. }));
        assert!(recorder.redirects.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_redirect_is_contained() {
        let (trigger, recorder, element) =
            setup(FakeBackend::ok("pk_test_1", "cs_123"), "submitBtn", true);
        trigger.initialize().await.unwrap();
        let logs = LogCapture::default();
        let _guard = logs.install();

        element.click().await;
        assert!(recorder.redirects.borrow().is_empty());
        assert!(logs.has_line(
            "ERROR",
            "Checkout failed: Redirect to checkout failed: network down"
        ));

        let client = FakeClient {
            recorder: recorder.clone(),
            reject_redirect: true,
        };
        let err = trigger.start_checkout(&client).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Redirect(_)));
    }

    #[tokio::test]
    async fn test_overlapping_clicks_issue_two_requests() {
        // not idempotent: each click creates its own session
        let (trigger, recorder, element) =
            setup(FakeBackend::ok("pk_test_1", "cs_123"), "submitBtn", false);
        trigger.initialize().await.unwrap();

        let mut first = element.press();
        let mut second = element.press();
        let (first, second) = (first.remove(0), second.remove(0));
        tokio::join!(first, second);

        assert_eq!(trigger.backend.session_calls.get(), 2);
        assert_eq!(trigger.backend.max_in_flight.get(), 2);
        assert_eq!(recorder.redirects.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_custom_button_id() {
        let (trigger, _recorder, element) =
            setup(FakeBackend::ok("pk_test_1", "cs_123"), "buyNow", false);
        let trigger = trigger.with_config(TriggerConfig::new().with_button_id("buyNow"));

        assert_eq!(trigger.initialize().await.unwrap(), TriggerState::Armed);
        assert_eq!(element.listener_count(), 1);
    }
}
