//! # Checkout Wire Types
//!
//! JSON bodies exchanged between the browser trigger and the server.
//! Both sides serialize through these types so the field names
//! (`publicKey`, `sessionId`) cannot drift.

use serde::{Deserialize, Serialize};

/// Body of `GET /config/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Publishable key used to construct the payment client
    pub public_key: String,
}

impl ConfigResponse {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }
}

/// Body of `GET /create-checkout-session/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    /// Opaque checkout session identifier
    pub session_id: String,
}

impl CheckoutSessionResponse {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// Argument of the payment client's hosted redirect, `{ sessionId }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectOptions {
    pub session_id: String,
}

impl From<CheckoutSessionResponse> for RedirectOptions {
    fn from(session: CheckoutSessionResponse) -> Self {
        Self {
            session_id: session.session_id,
        }
    }
}

/// Error body returned by the server when session creation fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
