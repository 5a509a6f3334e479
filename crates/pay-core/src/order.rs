//! # Order Types
//!
//! Checkout request and checkout session types for cube-checkout.

use crate::error::{PaymentError, PaymentResult};
use crate::order_id::OrderId;
use serde::{Deserialize, Serialize};

/// Payer details forwarded to the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

static NO_PAYER: Payer = Payer {
    name: None,
    phone: None,
};

impl Payer {
    /// Payer name, empty when absent. The gateway expects the field present.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Payer phone, empty when absent
    pub fn phone_or_empty(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }
}

/// A checkout request as submitted by the storefront client.
///
/// Every field is optional on the wire so that validation happens after the
/// gateway credential check, not during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Amount in the smallest currency unit
    #[serde(default)]
    pub amount_cents: Option<i64>,

    /// Payer email
    #[serde(default)]
    pub email: Option<String>,

    /// Caller-supplied order id; generated when absent or empty
    #[serde(default)]
    pub order_id: Option<String>,

    /// Gateway UI language
    #[serde(default)]
    pub locale: Option<String>,

    /// Optional payer details; `null` is treated like an absent object
    #[serde(default)]
    pub payer: Option<Payer>,
}

impl CheckoutRequest {
    pub fn new(amount_cents: i64, email: impl Into<String>) -> Self {
        Self {
            amount_cents: Some(amount_cents),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_payer(mut self, payer: Payer) -> Self {
        self.payer = Some(payer);
        self
    }

    /// Check required fields and return the validated view
    pub fn validate(&self) -> PaymentResult<ValidatedCheckout<'_>> {
        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());

        let (amount_cents, email) = match (self.amount_cents, email) {
            (Some(amount), Some(email)) if amount != 0 => (amount, email),
            _ => {
                return Err(PaymentError::Validation(
                    "amountCents and email are required".to_string(),
                ))
            }
        };

        if amount_cents < 0 {
            return Err(PaymentError::Validation(
                "amountCents must be a positive integer".to_string(),
            ));
        }

        Ok(ValidatedCheckout {
            amount_cents,
            email,
            order_id: self.order_id.as_deref().filter(|id| !id.is_empty()),
            locale: self.locale.as_deref().filter(|l| !l.is_empty()),
            payer: self.payer.as_ref().unwrap_or(&NO_PAYER),
        })
    }
}

/// Borrowed view of a checkout request whose required fields are present
#[derive(Debug, Clone, Copy)]
pub struct ValidatedCheckout<'a> {
    pub amount_cents: i64,
    pub email: &'a str,
    pub order_id: Option<&'a str>,
    pub locale: Option<&'a str>,
    pub payer: &'a Payer,
}

/// Result of a checkout initiation: where to send the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Gateway redirect URL carrying the signed payload
    pub pay_url: String,

    /// Order id bound into the signed payload
    pub order_id: OrderId,
}
