//! # Cube Checkout
//!
//! Storefront server with Paysera checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYSERA_PROJECT_ID=123456
//! export PAYSERA_SIGN_PASSWORD=...
//! export PAYSERA_ENV=sandbox
//! export BASE_URL=https://shop.example.lt
//!
//! # Run the server
//! cube-checkout
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (LOG_FORMAT=json for structured output)
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let (plain_layer, json_layer) = if json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(plain_layer)
        .with(json_layer)
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    info!("Storefront files: {}", state.config.static_dir.display());

    // Create router
    let app = routes::create_router(state);

    info!("Cube checkout starting on http://{}", addr);
    info!("Checkout: POST http://{}/api/payment/checkout", addr);
    info!("Callback: GET http://{}/payment/callback", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Cube Checkout
  ━━━━━━━━━━━━━━━━━━━━━━━
  Storefront + Paysera gateway
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
