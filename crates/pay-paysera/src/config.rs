//! # Paysera Configuration
//!
//! Credentials come from environment variables. Non-secret settings (order
//! prefix, currency, line item text) come from an optional TOML file and fall
//! back to the storefront defaults.

use pay_core::{CheckoutUrls, PaymentError, PaymentResult, DEFAULT_ORDER_PREFIX};
use serde::Deserialize;
use std::env;
use std::fmt;

pub const PRODUCTION_PAY_URL: &str = "https://bank.paysera.com/pay/";
pub const SANDBOX_PAY_URL: &str = "https://sandbox.paysera.com/pay/";

/// Which gateway deployment to send customers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayEnvironment {
    Production,
    #[default]
    Sandbox,
}

impl GatewayEnvironment {
    /// Anything other than `production` is treated as sandbox
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            GatewayEnvironment::Production
        } else {
            GatewayEnvironment::Sandbox
        }
    }

    pub fn pay_url(&self) -> &'static str {
        match self {
            GatewayEnvironment::Production => PRODUCTION_PAY_URL,
            GatewayEnvironment::Sandbox => SANDBOX_PAY_URL,
        }
    }

    /// Value of the gateway `test` parameter
    pub fn test_flag(&self) -> i64 {
        match self {
            GatewayEnvironment::Production => 0,
            GatewayEnvironment::Sandbox => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayEnvironment::Production => "production",
            GatewayEnvironment::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for GatewayEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-secret gateway settings (`config/gateway.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub order_prefix: String,
    pub currency: String,
    pub country: String,
    /// Line item text shown on the gateway page
    pub paytext: String,
    pub default_locale: String,
}

impl GatewaySettings {
    pub fn from_toml_str(content: &str) -> PaymentResult<Self> {
        toml::from_str(content)
            .map_err(|e| PaymentError::Configuration(format!("Invalid gateway settings: {}", e)))
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            order_prefix: DEFAULT_ORDER_PREFIX.to_string(),
            currency: "EUR".to_string(),
            country: "LT".to_string(),
            paytext: "Drivers development, VšĮ 306766699 – Infinity Cube".to_string(),
            default_locale: "lt".to_string(),
        }
    }
}

/// Gateway credentials, borrowed from a config that has both set
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub project_id: &'a str,
    pub sign_password: &'a str,
}

/// Paysera gateway configuration
#[derive(Clone)]
pub struct PayseraConfig {
    /// Gateway project identity
    pub project_id: Option<String>,

    /// Shared signing secret
    pub sign_password: Option<String>,

    pub environment: GatewayEnvironment,

    /// Accept/cancel/callback URLs derived from the public base URL
    pub urls: CheckoutUrls,

    pub settings: GatewaySettings,
}

impl PayseraConfig {
    /// Load configuration from environment variables.
    ///
    /// Credentials are optional here: a missing value surfaces as a
    /// `Configuration` error on each checkout rather than at startup.
    ///
    /// Env vars:
    /// - `PAYSERA_PROJECT_ID`
    /// - `PAYSERA_SIGN_PASSWORD`
    /// - `PAYSERA_ENV` (`production` | `sandbox`, default `sandbox`)
    /// - `BASE_URL` (default `http://localhost:3000`)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            project_id: non_empty("PAYSERA_PROJECT_ID"),
            sign_password: non_empty("PAYSERA_SIGN_PASSWORD"),
            environment: env::var("PAYSERA_ENV")
                .map(|v| GatewayEnvironment::parse(&v))
                .unwrap_or_default(),
            urls: CheckoutUrls::new(
                env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            settings: GatewaySettings::default(),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        project_id: impl Into<String>,
        sign_password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            project_id: Some(project_id.into()),
            sign_password: Some(sign_password.into()),
            environment: GatewayEnvironment::Sandbox,
            urls: CheckoutUrls::new(base_url),
            settings: GatewaySettings::default(),
        }
    }

    /// Builder: set gateway environment
    pub fn with_environment(mut self, environment: GatewayEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Builder: set non-secret settings
    pub fn with_settings(mut self, settings: GatewaySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Both credentials, or a `Configuration` error
    pub fn credentials(&self) -> PaymentResult<Credentials<'_>> {
        match (self.project_id.as_deref(), self.sign_password.as_deref()) {
            (Some(project_id), Some(sign_password))
                if !project_id.is_empty() && !sign_password.is_empty() =>
            {
                Ok(Credentials {
                    project_id,
                    sign_password,
                })
            }
            _ => Err(PaymentError::Configuration(
                "Missing Paysera credentials".to_string(),
            )),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn pay_url(&self) -> &'static str {
        self.environment.pay_url()
    }
}

impl fmt::Debug for PayseraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayseraConfig")
            .field("project_id", &self.project_id)
            .field("sign_password", &self.sign_password.as_ref().map(|_| "***"))
            .field("environment", &self.environment)
            .field("urls", &self.urls)
            .field("settings", &self.settings)
            .finish()
    }
}
