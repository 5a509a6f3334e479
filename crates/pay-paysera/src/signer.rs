//! # Request Signer
//!
//! The gateway signs `data` as `md5(data ++ password)`, hex-encoded in
//! lowercase. The hash is fixed by the gateway protocol; any other digest is
//! silently rejected by the remote side.

use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

/// Compute the signature of an encoded payload
pub fn sign(payload: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(payload.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute the signature and compare it with a candidate.
///
/// Comparison is case-insensitive and constant-time over the digest bytes.
pub fn verify(payload: &str, secret: &str, candidate: &str) -> bool {
    let expected = sign(payload, secret);
    let candidate = candidate.trim().to_ascii_lowercase();

    if candidate.len() != expected.len() {
        return false;
    }
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // md5("abc")
        assert_eq!(sign("ab", "c"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign("YW1vdW50PTEyOTk", "secret");
        let b = sign("YW1vdW50PTEyOTk", "secret");

        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_is_sensitive_to_payload_and_secret() {
        let base = sign("YW1vdW50PTEyOTk", "secret");

        assert_ne!(base, sign("YW1vdW50PTEyOTl", "secret"));
        assert_ne!(base, sign("YW1vdW50PTEyOTk", "secreT"));
    }

    #[test]
    fn test_verify_is_case_insensitive() {
        let sig = sign("payload", "secret");

        assert!(verify("payload", "secret", &sig));
        assert!(verify("payload", "secret", &sig.to_uppercase()));
        assert!(!verify("payload", "other", &sig));
        assert!(!verify("payload", "secret", &sig[..31]));
        assert!(!verify("payload", "secret", ""));
    }
}
