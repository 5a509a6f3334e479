//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the payment gateway, the fulfillment hook and configuration.

use pay_core::{
    BoxedFulfillmentHandler, BoxedPaymentGateway, LoggingFulfillmentHandler, OrderIdSequencer,
};
use pay_paysera::{GatewaySettings, PayseraConfig, PayseraGateway};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Built storefront (SPA) directory
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "dist".to_string())
                .into(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Receives every verified callback
    pub fulfillment: BoxedFulfillmentHandler,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Paysera gateway configured from the
    /// environment and the logging fulfillment handler
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let settings = load_gateway_settings()?;

        let gateway_config = PayseraConfig::from_env().with_settings(settings);
        if !gateway_config.is_configured() {
            tracing::warn!("Paysera credentials not set: checkout requests will fail");
        }
        tracing::info!(
            "Gateway: {} ({}), callbacks to {}",
            gateway_config.environment,
            gateway_config.pay_url(),
            gateway_config.urls.callback_url()
        );

        let sequencer = Arc::new(OrderIdSequencer::new(
            gateway_config.settings.order_prefix.clone(),
        ));
        let gateway = PayseraGateway::new(gateway_config, sequencer);

        Ok(Self::with_gateway(
            config,
            Arc::new(gateway),
            Arc::new(LoggingFulfillmentHandler),
        ))
    }

    /// Assemble state from explicit parts (for testing or custom order stores)
    pub fn with_gateway(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        fulfillment: BoxedFulfillmentHandler,
    ) -> Self {
        Self {
            gateway,
            fulfillment,
            config,
        }
    }
}

/// Load non-secret gateway settings from config file
fn load_gateway_settings() -> anyhow::Result<GatewaySettings> {
    let config_paths = [
        "config/gateway.toml",
        "../config/gateway.toml",
        "../../config/gateway.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings = GatewaySettings::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded gateway settings from {}", path);
            return Ok(settings);
        }
    }

    tracing::info!("No gateway settings file found, using defaults");
    Ok(GatewaySettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "dist".into(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            port: 3000,
            static_dir: "dist".into(),
        };

        assert!(config.socket_addr().is_err());
    }
}
