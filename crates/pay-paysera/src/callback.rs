//! # Callback Verification
//!
//! Inverse of the checkout path: authenticate `data` against the provided
//! signature, and only then decode it.
//!
//! The decoded amount and currency are NOT compared against the original
//! order here. The fulfillment collaborator must do that with
//! [`pay_core::VerifiedCallback::ensure_matches`].

use crate::{codec, signer};
use pay_core::{CallbackResult, RejectReason, VerifiedCallback};
use tracing::{debug, warn};

/// Verify a callback with the shared secret.
///
/// Pure function of its inputs: the gateway may redeliver a callback and
/// will get the same answer every time.
pub fn verify(secret: &str, data: &str, signature: &str) -> CallbackResult {
    if data.is_empty() || signature.is_empty() {
        return CallbackResult::Rejected(RejectReason::MissingFields);
    }

    if !signer::verify(data, secret, signature) {
        warn!("Callback rejected: signature mismatch");
        return CallbackResult::Rejected(RejectReason::SignatureMismatch);
    }

    match codec::decode(data) {
        Ok(params) => {
            debug!("Callback verified: {} params", params.len());
            CallbackResult::Verified(VerifiedCallback::new(params))
        }
        Err(e) => {
            warn!("Callback rejected after signature match: {}", e);
            CallbackResult::Rejected(RejectReason::MalformedPayload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PaymentParameters;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    const SECRET: &str = "test-password";

    fn signed_callback() -> (String, String) {
        let params = PaymentParameters::new()
            .with("orderid", "CUBE-20261018-007")
            .with("amount", 1299)
            .with("currency", "EUR")
            .with("status", "1");
        let data = codec::encode(&params);
        let sig = signer::sign(&data, SECRET);
        (data, sig)
    }

    #[test]
    fn test_valid_callback_is_verified() {
        let (data, sig) = signed_callback();
        let result = verify(SECRET, &data, &sig);

        let callback = result.verified().unwrap();
        assert_eq!(callback.order_id(), Some("CUBE-20261018-007"));
        assert_eq!(callback.amount_cents(), Some(1299));
        assert!(callback.is_paid());
    }

    #[test]
    fn test_uppercase_signature_accepted() {
        let (data, sig) = signed_callback();
        assert!(verify(SECRET, &data, &sig.to_uppercase()).is_verified());
    }

    #[test]
    fn test_tampered_data_rejected() {
        let (data, sig) = signed_callback();
        let tampered = codec::encode(
            &PaymentParameters::new()
                .with("orderid", "CUBE-20261018-007")
                .with("amount", 1),
        );

        assert_eq!(
            verify(SECRET, &tampered, &sig),
            CallbackResult::Rejected(RejectReason::SignatureMismatch)
        );
        assert_eq!(
            verify("wrong-secret", &data, &sig),
            CallbackResult::Rejected(RejectReason::SignatureMismatch)
        );
    }

    #[test]
    fn test_mismatch_on_garbage_never_decodes() {
        assert_eq!(
            verify(SECRET, "!!!", "00000000000000000000000000000000"),
            CallbackResult::Rejected(RejectReason::SignatureMismatch)
        );
    }

    #[test]
    fn test_signed_but_malformed_payload() {
        // correctly signed, but "__4" decodes to invalid utf-8
        let data = "__4";
        let sig = signer::sign(data, SECRET);

        assert_eq!(
            verify(SECRET, data, &sig),
            CallbackResult::Rejected(RejectReason::MalformedPayload)
        );
    }

    #[test]
    fn test_missing_fields() {
        let (data, _) = signed_callback();
        assert_eq!(
            verify(SECRET, &data, ""),
            CallbackResult::Rejected(RejectReason::MissingFields)
        );
        assert_eq!(
            verify(SECRET, "", "abc"),
            CallbackResult::Rejected(RejectReason::MissingFields)
        );
    }

    #[test]
    fn test_redelivery_is_idempotent() {
        let data = URL_SAFE_NO_PAD.encode("amount=500&orderid=A");
        let sig = signer::sign(&data, SECRET);

        assert_eq!(verify(SECRET, &data, &sig), verify(SECRET, &data, &sig));
    }
}
