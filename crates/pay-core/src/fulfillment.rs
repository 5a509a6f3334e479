//! # Order Fulfillment Hook
//!
//! Verified callbacks are handed to a [`FulfillmentHandler`]. Persisting the
//! order, sending invoices and reconciling with accounting all live behind
//! this trait, outside the gateway core.
//!
//! The gateway may deliver the same callback more than once and the core
//! does not deduplicate. Implementations must make "mark order paid" safe to
//! apply twice, and should call [`VerifiedCallback::ensure_matches`] against
//! the stored order before trusting the reported amount.

use crate::callback::VerifiedCallback;
use crate::error::PaymentResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

#[async_trait]
pub trait FulfillmentHandler: Send + Sync {
    /// Called once per verified callback delivery
    async fn on_payment_confirmed(&self, callback: &VerifiedCallback) -> PaymentResult<()>;
}

/// Shared fulfillment handler (dynamic dispatch)
pub type BoxedFulfillmentHandler = Arc<dyn FulfillmentHandler>;

/// Default handler: logs the confirmation and nothing else
pub struct LoggingFulfillmentHandler;

#[async_trait]
impl FulfillmentHandler for LoggingFulfillmentHandler {
    async fn on_payment_confirmed(&self, callback: &VerifiedCallback) -> PaymentResult<()> {
        info!(
            "Payment callback verified: order={:?}, amount={:?}, currency={:?}, paid={}",
            callback.order_id(),
            callback.amount_cents(),
            callback.currency(),
            callback.is_paid()
        );
        // TODO: cross-check amount/currency against the order store and mark it paid
        warn!("No order store configured: amount/currency not cross-checked, order not marked paid");
        Ok(())
    }
}
