//! # checkout-server
//!
//! Serves the checkout page and the endpoints its trigger calls.
//!
//! ## Usage
//!
//! ```bash
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//! export STRIPE_PRICE_ID=price_...
//!
//! checkout-server
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!(
        "Stripe mode: {}",
        if state.stripe.config().is_test_mode() {
            "test"
        } else {
            "live"
        }
    );
    info!("Serving static files from {}", state.config.static_dir);

    if !state.config.is_production() {
        info!("Checkout page: http://{}/", addr);
        info!("Webhook: POST http://{}/webhook/", addr);
    }

    let app = routes::create_router(state);

    info!("checkout-server {} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
