//! Webhook signature verification.
//!
//! Up signs every webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the per-webhook shared secret, and sends the digest as a
//! lowercase hex string in the `X-Up-Authenticity-Signature` header.
//!
//! Verification must run against the raw body bytes exactly as received.
//! Re-serializing a parsed body can change byte content (key order, number
//! formatting) and invalidate the signature.

use crate::secret::SecretString;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

/// Name of the header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Up-Authenticity-Signature";

/// Check whether a webhook delivery genuinely originated from Up.
///
/// Computes the HMAC-SHA256 digest of `raw_body` keyed by `secret`, renders
/// it as lowercase hex, and compares it against `provided_signature` in
/// constant time.
///
/// Returns `false` (never an error) when the secret is unconfigured, the
/// body is empty, or no signature header was supplied. Requests failing any
/// of these checks must be treated as not authentic.
pub fn is_authentic_request(
    raw_body: &[u8],
    provided_signature: Option<&str>,
    secret: &SecretString,
) -> bool {
    if secret.is_empty() {
        warn!("Webhook secret is not configured; rejecting request");
        return false;
    }

    if raw_body.is_empty() {
        return false;
    }

    let Some(provided) = provided_signature else {
        return false;
    };

    type HmacSha256 = Hmac<Sha256>;

    // HMAC-SHA256 accepts keys of any length, so construction cannot fail
    // for a non-empty secret; treat the impossible case as not authentic.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()) else {
        return false;
    };
    mac.update(raw_body);
    let expected = hex::encode(mac.finalize().into_bytes());

    // ct_eq yields false for length mismatches without early exit.
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
