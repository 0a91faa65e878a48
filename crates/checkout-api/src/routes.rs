//! # Routes
//!
//! Axum router for the checkout server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /                          - Home page with the checkout button
/// - GET  /config/                   - `{"publicKey": ...}`
/// - GET  /create-checkout-session/  - `{"sessionId": ...}`
/// - GET  /success/, /success        - Success page
/// - GET  /cancel/                   - Cancel page
/// - POST /webhook/                  - Stripe webhook
/// - GET  /health                    - Health check
/// - GET  /static/*                  - Built wasm package and assets
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/config/", get(handlers::stripe_config))
        .route(
            "/create-checkout-session/",
            get(handlers::create_checkout_session),
        )
        .route("/success/", get(handlers::checkout_success))
        .route("/success", get(handlers::checkout_success))
        .route("/cancel/", get(handlers::checkout_cancel))
        .route("/webhook/", post(handlers::stripe_webhook))
        .nest_service("/static", static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
