//! # pay-paysera
//!
//! Paysera redirect gateway for cube-checkout.
//!
//! The protocol has three pieces:
//!
//! 1. **codec** - key-sorted, form-urlencoded parameters wrapped in
//!    URL-safe base64 without padding (the `data` parameter)
//! 2. **signer** - `md5(data ++ password)` in lowercase hex (the `sign` parameter)
//! 3. **callback** - the gateway calls back with the same `{data, sign}`
//!    shape; the signature is checked before anything is decoded
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_paysera::PayseraGateway;
//! use pay_core::{CheckoutRequest, PaymentGateway};
//!
//! let gateway = PayseraGateway::from_env();
//!
//! let session = gateway.initiate(&CheckoutRequest::new(1299, "a@b.lt"))?;
//! // Redirect user to session.pay_url
//!
//! // Later, in the callback endpoint:
//! let result = gateway.verify_callback(&data, &sign);
//! ```

pub mod callback;
pub mod checkout;
pub mod codec;
pub mod config;
pub mod params;
pub mod signer;

// Re-exports
pub use checkout::PayseraGateway;
pub use config::{GatewayEnvironment, GatewaySettings, PayseraConfig};
pub use params::{ParamValue, PaymentParameters};
