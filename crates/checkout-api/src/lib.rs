//! # checkout-api
//!
//! HTTP server behind the browser checkout trigger.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Home page with `#submitBtn` |
//! | GET | `/config/` | Publishable key |
//! | GET | `/create-checkout-session/` | New subscription session id |
//! | GET | `/success/` | Success page |
//! | GET | `/cancel/` | Cancel page |
//! | POST | `/webhook/` | Stripe webhook |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
