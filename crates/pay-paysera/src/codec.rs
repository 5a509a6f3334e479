//! # Parameter Canonicalizer
//!
//! Wire encoding of the gateway `data` parameter:
//!
//! 1. drop absent values
//! 2. sort by key
//! 3. stringify values
//! 4. join as `application/x-www-form-urlencoded` (`key=value&...`)
//! 5. base64 with the URL-safe alphabet, trailing `=` stripped
//!
//! Every step is required for the gateway to accept the payload. The
//! encoded string is also the pre-image for signing, so it must be
//! byte-for-byte deterministic.

use crate::params::PaymentParameters;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use pay_core::{PaymentError, PaymentResult};
use std::collections::BTreeMap;

/// Canonical query string: present entries, key-sorted, form-urlencoded
pub fn canonical_query(params: &PaymentParameters) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.present() {
        serializer.append_pair(key, &value.to_string());
    }
    serializer.finish()
}

/// Encode parameters into the opaque transport string
pub fn encode(params: &PaymentParameters) -> String {
    URL_SAFE_NO_PAD.encode(canonical_query(params))
}

/// Decode a transport string back into the canonical query string.
///
/// Accepts both the URL-safe and the standard alphabet, with or without
/// padding.
pub fn decode_query(payload: &str) -> PaymentResult<String> {
    let trimmed = payload.trim().trim_end_matches('=');
    let mut standard: String = trimmed
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    match standard.len() % 4 {
        0 => {}
        rem => standard.push_str(&"=".repeat(4 - rem)),
    }

    let bytes = STANDARD
        .decode(standard.as_bytes())
        .map_err(|e| PaymentError::MalformedPayload(format!("invalid base64: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| PaymentError::MalformedPayload(format!("invalid utf-8: {}", e)))
}

/// Decode a transport string into a key/value mapping.
///
/// Repeated keys keep the last value.
pub fn decode(payload: &str) -> PaymentResult<BTreeMap<String, String>> {
    let query = decode_query(payload)?;
    Ok(form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect())
}
