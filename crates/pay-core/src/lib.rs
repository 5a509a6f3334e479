//! # pay-core
//!
//! Core types and traits for the cube-checkout gateway integration.
//!
//! This crate provides:
//! - `PaymentGateway` trait for redirect-style payment gateways
//! - `OrderIdSequencer` for date-scoped order identifiers
//! - `CheckoutRequest` and `CheckoutSession` for the checkout flow
//! - `CallbackResult` and `VerifiedCallback` for payment confirmations
//! - `FulfillmentHandler` hook for the external order store
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CheckoutRequest, PaymentGateway};
//!
//! let request = CheckoutRequest::new(1299, "a@b.lt").with_locale("lt");
//! let session = gateway.initiate(&request)?;
//!
//! // Redirect user to session.pay_url
//! ```

pub mod callback;
pub mod error;
pub mod fulfillment;
pub mod order;
pub mod order_id;
pub mod strategy;

// Re-exports for convenience
pub use callback::{CallbackRequest, CallbackResult, RejectReason, VerifiedCallback};
pub use error::{PaymentError, PaymentResult};
pub use fulfillment::{BoxedFulfillmentHandler, FulfillmentHandler, LoggingFulfillmentHandler};
pub use order::{CheckoutRequest, CheckoutSession, Payer, ValidatedCheckout};
pub use order_id::{OrderId, OrderIdSequencer, DEFAULT_ORDER_PREFIX};
pub use strategy::{BoxedPaymentGateway, CheckoutUrls, PaymentGateway};
