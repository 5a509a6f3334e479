//! # Callback Types
//!
//! Outcome of verifying an asynchronous payment-confirmation callback.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Gateway status value meaning "payment accepted"
pub const STATUS_PAID: &str = "1";

/// Callback as received at the HTTP boundary, with the signature already
/// normalized from whichever parameter name the gateway used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackRequest {
    pub data: Option<String>,
    pub signature: Option<String>,
}

impl CallbackRequest {
    /// Normalize the two accepted signature parameter names into one field.
    /// `sign` takes precedence over `ss1`.
    pub fn from_query(data: Option<String>, sign: Option<String>, ss1: Option<String>) -> Self {
        let signature = sign.filter(|s| !s.is_empty()).or(ss1);
        Self { data, signature }
    }
}

/// Why a callback was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MissingFields,
    SignatureMismatch,
    MalformedPayload,
    NotConfigured,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MissingFields => "missing fields",
            RejectReason::SignatureMismatch => "signature mismatch",
            RejectReason::MalformedPayload => "malformed payload",
            RejectReason::NotConfigured => "gateway not configured",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded parameters of a callback whose signature matched.
///
/// The core does not compare amount or currency against the original order.
/// That check belongs to the fulfillment collaborator, see
/// [`VerifiedCallback::ensure_matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedCallback {
    params: BTreeMap<String, String>,
}

impl VerifiedCallback {
    pub fn new(params: BTreeMap<String, String>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn order_id(&self) -> Option<&str> {
        self.get("orderid")
    }

    /// Amount the gateway reports, in the smallest currency unit
    pub fn amount_cents(&self) -> Option<i64> {
        self.get("amount").and_then(|a| a.parse().ok())
    }

    pub fn currency(&self) -> Option<&str> {
        self.get("currency")
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status")
    }

    /// Check if the gateway reports the payment as accepted
    pub fn is_paid(&self) -> bool {
        self.status() == Some(STATUS_PAID)
    }

    /// Cross-check the reported amount and currency against the order.
    pub fn ensure_matches(&self, amount_cents: i64, currency: &str) -> PaymentResult<()> {
        match self.amount_cents() {
            Some(actual) if actual == amount_cents => {}
            other => {
                return Err(PaymentError::ExpectationMismatch {
                    field: "amount",
                    expected: amount_cents.to_string(),
                    actual: other.map(|a| a.to_string()).unwrap_or_default(),
                })
            }
        }

        match self.currency() {
            Some(actual) if actual.eq_ignore_ascii_case(currency) => Ok(()),
            other => Err(PaymentError::ExpectationMismatch {
                field: "currency",
                expected: currency.to_string(),
                actual: other.unwrap_or_default().to_string(),
            }),
        }
    }
}

/// Verification outcome of a callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackResult {
    Verified(VerifiedCallback),
    Rejected(RejectReason),
}

impl CallbackResult {
    pub fn is_verified(&self) -> bool {
        matches!(self, CallbackResult::Verified(_))
    }

    pub fn verified(&self) -> Option<&VerifiedCallback> {
        match self {
            CallbackResult::Verified(callback) => Some(callback),
            CallbackResult::Rejected(_) => None,
        }
    }

    /// Convert into the error taxonomy
    pub fn into_result(self) -> PaymentResult<VerifiedCallback> {
        match self {
            CallbackResult::Verified(callback) => Ok(callback),
            CallbackResult::Rejected(RejectReason::MissingFields) => Err(
                PaymentError::MissingFields("data and signature are required".to_string()),
            ),
            CallbackResult::Rejected(RejectReason::SignatureMismatch) => {
                Err(PaymentError::SignatureMismatch)
            }
            CallbackResult::Rejected(RejectReason::MalformedPayload) => Err(
                PaymentError::MalformedPayload("payload could not be decoded".to_string()),
            ),
            CallbackResult::Rejected(RejectReason::NotConfigured) => Err(
                PaymentError::Configuration("gateway credentials are not set".to_string()),
            ),
        }
    }
}
