//! # Routes
//!
//! Axum router configuration for the storefront server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - API:
///   - POST /api/payment/checkout - Sign an order, return the gateway URL
///
/// - Gateway:
///   - GET /payment/accept   - Redirect to `/?paid=1`
///   - GET /payment/cancel   - Redirect to `/?canceled=1`
///   - GET /payment/callback - Verify a payment confirmation (`OK` / `ERROR`)
///
/// - Everything else is served from the built storefront directory, with
///   `index.html` as the SPA fallback.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route("/checkout", post(handlers::create_checkout));

    // Gateway-facing routes: browser redirects and the async callback
    let gateway_routes = Router::new()
        .route("/accept", get(handlers::payment_accept))
        .route("/cancel", get(handlers::payment_cancel))
        .route("/callback", get(handlers::payment_callback));

    let static_dir = &state.config.static_dir;
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/payment", api_routes)
        .nest("/payment", gateway_routes)
        .fallback_service(spa)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}
