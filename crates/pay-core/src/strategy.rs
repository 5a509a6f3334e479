//! # Payment Gateway Trait
//!
//! Seam between the HTTP boundary and a concrete redirect-style payment
//! gateway.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PaymentGateway (trait)                     │
//! │  ├── initiate()         build signed redirect URL           │
//! │  ├── verify_callback()  authenticate + decode callback      │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │PayseraGateway │
//!                    └───────────────┘
//! ```
//!
//! Both operations are pure call/return computations: the gateway is reached
//! by a client-side redirect, never by an outbound request from here.

use crate::callback::CallbackResult;
use crate::error::PaymentResult;
use crate::order::{CheckoutRequest, CheckoutSession};
use std::sync::Arc;

/// Core trait for redirect-style payment gateways.
pub trait PaymentGateway: Send + Sync {
    /// Fail with `Configuration` if credentials are missing
    fn ensure_configured(&self) -> PaymentResult<()>;

    /// Build and sign a checkout, returning the gateway redirect URL.
    ///
    /// Fails with `Configuration` before looking at the request when
    /// credentials are missing, then with `Validation` for bad input.
    fn initiate(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSession>;

    /// Authenticate and decode a gateway callback.
    ///
    /// Side-effect free and idempotent: redelivered callbacks produce the
    /// same result.
    fn verify_callback(&self, data: &str, signature: &str) -> CallbackResult;

    /// Get the provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// URLs the gateway sends the customer and its callback to
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Public base URL of the storefront (e.g., "https://shop.example.lt")
    pub base_url: String,
    pub accept_path: String,
    pub cancel_path: String,
    pub callback_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            accept_path: "/payment/accept".to_string(),
            cancel_path: "/payment/cancel".to_string(),
            callback_path: "/payment/callback".to_string(),
        }
    }

    pub fn accept_url(&self) -> String {
        format!("{}{}", self.base_url, self.accept_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }

    pub fn callback_url(&self) -> String {
        format!("{}{}", self.base_url, self.callback_path)
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_urls() {
        let urls = CheckoutUrls::new("https://shop.example.lt/");

        assert_eq!(urls.accept_url(), "https://shop.example.lt/payment/accept");
        assert_eq!(urls.cancel_url(), "https://shop.example.lt/payment/cancel");
        assert_eq!(
            urls.callback_url(),
            "https://shop.example.lt/payment/callback"
        );
    }
}
