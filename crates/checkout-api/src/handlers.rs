//! # Request Handlers
//!
//! Axum request handlers for the endpoints the browser trigger consumes,
//! plus the pages around the hosted checkout.

use crate::pages;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use checkout_core::{CheckoutError, CheckoutSessionResponse, ConfigResponse, ErrorBody};
use checkout_stripe::{dispatch_webhook_event, verify_webhook};
use serde::Deserialize;
use tracing::{error, info, instrument};

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, err: &CheckoutError) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-trigger",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Home page hosting the `#submitBtn` trigger
pub async fn home() -> Html<&'static str> {
    Html(pages::HOME)
}

/// `GET /config/`: the publishable key for `Stripe(publicKey)`
pub async fn stripe_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse::new(
        state.stripe.config().publishable_key.clone(),
    ))
}

/// `GET /create-checkout-session/`: a fresh subscription session id
#[instrument(skip(state))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
) -> Result<Json<CheckoutSessionResponse>, ErrorResponse> {
    let session = state
        .stripe
        .create_subscription_session(None, &state.config.success_url(), &state.config.cancel_url())
        .await
        .map_err(|e| {
            error!("Failed to create checkout session: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e)
        })?;

    Ok(Json(CheckoutSessionResponse::new(session.id)))
}

#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub session_id: Option<String>,
}

/// Checkout success page
pub async fn checkout_success(Query(query): Query<SuccessQuery>) -> Html<String> {
    Html(pages::success(query.session_id.as_deref()))
}

/// Checkout cancel page
pub async fn checkout_cancel() -> Html<&'static str> {
    Html(pages::CANCEL)
}

/// `POST /webhook/`: verify and dispatch a Stripe event
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ErrorResponse> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                &CheckoutError::WebhookVerificationFailed(
                    "Missing Stripe-Signature header".to_string(),
                ),
            )
        })?;

    let event = verify_webhook(
        &body,
        signature,
        &state.stripe.config().webhook_secret,
        chrono::Utc::now(),
    )
    .map_err(|e| {
        error!("Webhook verification failed: {}", e);
        error_response(StatusCode::BAD_REQUEST, &e)
    })?;

    info!(
        "Received webhook: type={:?}, id={}, created={}",
        event.event_type,
        event.event_id,
        event
            .created
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string())
    );

    dispatch_webhook_event(state.webhook_handler.as_ref(), event).map_err(|e| {
        error!("Webhook handler error: {}", e);
        let status = StatusCode::from_u16(e.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error_response(status, &e)
    })?;

    Ok(StatusCode::OK)
}
