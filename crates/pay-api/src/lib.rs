//! # pay-api
//!
//! HTTP API layer for cube-checkout.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout endpoint that returns a signed gateway redirect
//! - Gateway accept/cancel redirects and the payment callback
//! - Static storefront serving with SPA fallback
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/payment/checkout` | Create checkout redirect |
//! | GET | `/payment/accept` | Redirect to storefront (`?paid=1`) |
//! | GET | `/payment/cancel` | Redirect to storefront (`?canceled=1`) |
//! | GET | `/payment/callback` | Gateway callback (`OK` / `ERROR`) |
//! | GET | `/*` | Storefront static files |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
