//! # Stripe Webhook Handling
//!
//! Signature verification and dispatch for the events Stripe posts to
//! `/webhook/` once the hosted checkout completes.

use checkout_core::timestamp::{from_unix, parse_timestamp};
use checkout_core::{CheckoutError, CheckoutResult};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, info};

/// Allowed clock skew between Stripe's signature timestamp and ours
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// A verified webhook event
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub event_id: String,
    pub event_type: WebhookEventType,
    pub created: Option<DateTime<Utc>>,
    /// `data.object` of the event
    pub object: serde_json::Map<String, serde_json::Value>,
}

/// Event types this server reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    CheckoutCompleted,
    SubscriptionDeleted,
    InvoicePaid,
    Unknown(String),
}

impl From<&str> for WebhookEventType {
    fn from(value: &str) -> Self {
        match value {
            "checkout.session.completed" => WebhookEventType::CheckoutCompleted,
            "customer.subscription.deleted" => WebhookEventType::SubscriptionDeleted,
            "invoice.paid" => WebhookEventType::InvoicePaid,
            other => WebhookEventType::Unknown(other.to_string()),
        }
    }
}

/// Parsed `checkout.session.completed` data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionCompleted {
    pub session_id: String,
    /// Application user the session was created for, if any
    pub client_reference_id: Option<String>,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
}

impl SubscriptionCompleted {
    /// Parse from a webhook event
    pub fn from_event(event: &WebhookEvent) -> CheckoutResult<Self> {
        let field = |name: &str| {
            event
                .object
                .get(name)
                .and_then(|v| v.as_str())
                .map(String::from)
        };

        let session_id = field("id")
            .ok_or_else(|| CheckoutError::WebhookParseError("Missing session id".to_string()))?;

        Ok(Self {
            session_id,
            client_reference_id: field("client_reference_id"),
            customer_id: field("customer"),
            subscription_id: field("subscription"),
        })
    }
}

/// Webhook event handler trait
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    /// Called when a checkout session is completed
    fn on_checkout_completed(&self, data: SubscriptionCompleted) -> CheckoutResult<()> {
        info!(
            "Subscription checkout completed: session={}, user={:?}, customer={:?}, subscription={:?}",
            data.session_id, data.client_reference_id, data.customer_id, data.subscription_id
        );
        Ok(())
    }

    /// Called when a subscription is cancelled
    fn on_subscription_deleted(&self, event: &WebhookEvent) -> CheckoutResult<()> {
        info!("Subscription deleted: {:?}", event.object.get("id"));
        Ok(())
    }

    /// Called when a renewal invoice is paid
    fn on_invoice_paid(&self, event: &WebhookEvent) -> CheckoutResult<()> {
        info!("Invoice paid: {:?}", event.object.get("subscription"));
        Ok(())
    }

    /// Called for unknown/unhandled events
    fn on_unknown_event(&self, event: &WebhookEvent) -> CheckoutResult<()> {
        debug!("Unhandled webhook event: {:?}", event.event_type);
        Ok(())
    }
}

/// Default webhook handler (just logs events)
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Dispatch a webhook event to the appropriate handler method
pub fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: WebhookEvent,
) -> CheckoutResult<()> {
    match &event.event_type {
        WebhookEventType::CheckoutCompleted => {
            let data = SubscriptionCompleted::from_event(&event)?;
            handler.on_checkout_completed(data)
        }
        WebhookEventType::SubscriptionDeleted => handler.on_subscription_deleted(&event),
        WebhookEventType::InvoicePaid => handler.on_invoice_paid(&event),
        WebhookEventType::Unknown(_) => handler.on_unknown_event(&event),
    }
}

/// Verify a `Stripe-Signature` header against `payload` and parse the event.
///
/// `now` is the receive time the signature timestamp is checked against.
pub fn verify_webhook(
    payload: &[u8],
    signature: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> CheckoutResult<WebhookEvent> {
    let header = parse_signature_header(signature)?;

    if (now - header.timestamp).num_seconds().abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(CheckoutError::WebhookVerificationFailed(
            "Timestamp outside tolerance".to_string(),
        ));
    }

    let expected = compute_signature(secret, &header.signed_timestamp, payload)?;
    let valid = header
        .signatures
        .iter()
        .any(|sig| constant_time_compare(sig, &expected));

    if !valid {
        return Err(CheckoutError::WebhookVerificationFailed(
            "Signature mismatch".to_string(),
        ));
    }

    let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
        CheckoutError::WebhookParseError(format!("Failed to parse webhook: {}", e))
    })?;

    debug!("Verified Stripe webhook: type={}", event.event_type);

    Ok(WebhookEvent {
        event_id: event.id,
        event_type: WebhookEventType::from(event.event_type.as_str()),
        created: from_unix(event.created),
        object: event.data.object,
    })
}

/// Hex HMAC-SHA256 of `"{timestamp}.{payload}"`, as Stripe signs it
pub fn compute_signature(secret: &str, timestamp: &str, payload: &[u8]) -> CheckoutResult<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|e| CheckoutError::Internal(format!("Invalid HMAC key: {}", e)))?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    created: i64,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Map<String, serde_json::Value>,
}

struct SignatureHeader {
    /// `t` exactly as sent; it is part of the signed message
    signed_timestamp: String,
    timestamp: DateTime<Utc>,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> CheckoutResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = parse_timestamp(value).map(|ts| (value.to_string(), ts))
            }
            Some(("v1", value)) => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let (signed_timestamp, timestamp) = timestamp.ok_or_else(|| {
        CheckoutError::WebhookVerificationFailed("Missing timestamp in signature".to_string())
    })?;

    if signatures.is_empty() {
        return Err(CheckoutError::WebhookVerificationFailed(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        signed_timestamp,
        timestamp,
        signatures,
    })
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const NOW: i64 = 1_700_000_000;

    fn at(secs: i64) -> DateTime<Utc> {
        from_unix(secs).unwrap()
    }

    fn completed_payload() -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": NOW,
            "data": { "object": {
                "id": "cs_test_123",
                "client_reference_id": "42",
                "customer": "cus_1",
                "subscription": "sub_1"
            }}
        }))
        .unwrap()
    }

    fn sign(payload: &[u8], timestamp: i64) -> String {
        format!(
            "t={},v1={}",
            timestamp,
            compute_signature(SECRET, &timestamp.to_string(), payload).unwrap()
        )
    }

    #[test]
    fn test_parse_signature_header() {
        let parsed = parse_signature_header("t=1234567890,v1=abc123,v1=def456,v0=zzz").unwrap();
        assert_eq!(parsed.timestamp.timestamp(), 1234567890);
        assert_eq!(parsed.signed_timestamp, "1234567890");
        assert_eq!(parsed.signatures, vec!["abc123", "def456"]);

        assert!(parse_signature_header("v1=abc").is_err());
        assert!(parse_signature_header("t=123").is_err());
        assert!(parse_signature_header("t=later,v1=abc").is_err());
    }

    #[test]
    fn test_verify_valid_signature() {
        let payload = completed_payload();
        let event = verify_webhook(&payload, &sign(&payload, NOW), SECRET, at(NOW + 10)).unwrap();

        assert_eq!(event.event_id, "evt_1");
        assert_eq!(event.event_type, WebhookEventType::CheckoutCompleted);
        assert_eq!(event.created.unwrap().timestamp(), NOW);
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let payload = completed_payload();
        let signature = sign(&payload, NOW);
        let mut tampered = payload.clone();
        tampered.extend_from_slice(b" ");

        let err = verify_webhook(&tampered, &signature, SECRET, at(NOW)).unwrap_err();
        assert!(matches!(err, CheckoutError::WebhookVerificationFailed(_)));
    }

    #[test]
    fn test_verify_rejects_stale_timestamp() {
        let payload = completed_payload();
        let signature = sign(&payload, NOW);

        let err =
            verify_webhook(&payload, &signature, SECRET, at(NOW + SIGNATURE_TOLERANCE_SECS + 1))
                .unwrap_err();
        assert!(matches!(err, CheckoutError::WebhookVerificationFailed(_)));
    }

    #[test]
    fn test_subscription_completed_from_event() {
        let payload = completed_payload();
        let event = verify_webhook(&payload, &sign(&payload, NOW), SECRET, at(NOW)).unwrap();
        let data = SubscriptionCompleted::from_event(&event).unwrap();

        assert_eq!(data.session_id, "cs_test_123");
        assert_eq!(data.client_reference_id.as_deref(), Some("42"));
        assert_eq!(data.subscription_id.as_deref(), Some("sub_1"));
        assert!(dispatch_webhook_event(&LoggingWebhookHandler, event).is_ok());
    }

    #[test]
    fn test_event_type_mapping() {
        assert_eq!(
            WebhookEventType::from("invoice.paid"),
            WebhookEventType::InvoicePaid
        );
        assert_eq!(
            WebhookEventType::from("charge.refunded"),
            WebhookEventType::Unknown("charge.refunded".into())
        );
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
