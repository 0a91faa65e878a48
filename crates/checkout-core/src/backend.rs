//! # HTTP Checkout Backend
//!
//! `reqwest` implementation of [`CheckoutBackend`]. Compiles for native
//! targets and for `wasm32`, where reqwest goes through the browser's
//! `fetch`.

use crate::config::TriggerConfig;
use crate::error::{CheckoutError, CheckoutResult};
use crate::ports::CheckoutBackend;
use crate::session::{CheckoutSessionResponse, ConfigResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Backend talking to the checkout server over HTTP
#[derive(Debug, Clone)]
pub struct HttpCheckoutBackend {
    client: Client,
    base_url: String,
    config: TriggerConfig,
}

impl HttpCheckoutBackend {
    /// Create a backend rooted at `base_url` (e.g. `window.location.origin`)
    pub fn new(base_url: impl Into<String>, config: TriggerConfig) -> CheckoutResult<Self> {
        Ok(Self::with_client(build_client()?, base_url, config))
    }

    /// Create a backend with an existing HTTP client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        config: TriggerConfig,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CheckoutResult<T> {
        let url = self.url(path);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("GET {} -> {}: {}", url, status, body);

        if !status.is_success() {
            return Err(CheckoutError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse response from {}: {}", url, e))
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> CheckoutResult<Client> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> CheckoutResult<Client> {
    Client::builder()
        .build()
        .map_err(|e| CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

#[async_trait(?Send)]
impl CheckoutBackend for HttpCheckoutBackend {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_config(&self) -> CheckoutResult<ConfigResponse> {
        self.get_json(&self.config.config_path).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn create_checkout_session(&self) -> CheckoutResult<CheckoutSessionResponse> {
        self.get_json(&self.config.session_path).await
    }
}
