//! Tests for webhook signature verification.
//!
//! Verifies the HMAC-SHA256 digest comparison and the fail-closed behaviour
//! for unconfigured secrets, missing headers, and empty bodies.

use super::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;

// ============================================================================
// Helpers
// ============================================================================

/// Compute the HMAC-SHA256 of `payload` keyed by `secret` and return it as
/// a lowercase hex string, the exact format Up sends in the header.
fn compute_signature(secret: &str, payload: &[u8]) -> String {
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

// ============================================================================
// is_authentic_request tests
// ============================================================================

/// A correctly signed body must be accepted.
#[test]
fn test_valid_signature_accepted() {
    let secret = SecretString::new("my-webhook-secret");
    let body = br#"{"data":{"attributes":{"eventType":"PING"}}}"#;
    let signature = compute_signature("my-webhook-secret", body);

    assert!(is_authentic_request(body, Some(&signature), &secret));
}

/// A signature produced with a different secret must be rejected.
#[test]
fn test_wrong_secret_rejected() {
    let secret = SecretString::new("correct-secret");
    let body = b"some payload";
    let signature = compute_signature("other-secret", body);

    assert!(!is_authentic_request(body, Some(&signature), &secret));
}

/// A tampered digest of the correct length must be rejected.
#[test]
fn test_tampered_signature_rejected() {
    let secret = SecretString::new("my-webhook-secret");
    let body = b"original payload";
    let tampered = "0".repeat(64);

    assert!(!is_authentic_request(body, Some(&tampered), &secret));
}

/// Uppercase hex does not match; the comparison is exact, not case-folded.
#[test]
fn test_uppercase_hex_rejected() {
    let secret = SecretString::new("my-webhook-secret");
    let body = b"payload";
    let signature = compute_signature("my-webhook-secret", body).to_uppercase();

    assert!(!is_authentic_request(body, Some(&signature), &secret));
}

/// An unconfigured secret rejects every request.
#[test]
fn test_missing_secret_rejected() {
    let secret = SecretString::default();
    let body = b"payload";
    let signature = compute_signature("", body);

    assert!(!is_authentic_request(body, Some(&signature), &secret));
}

/// A request without the signature header must be rejected.
#[test]
fn test_missing_signature_header_rejected() {
    let secret = SecretString::new("my-webhook-secret");

    assert!(!is_authentic_request(b"payload", None, &secret));
}

/// An empty body must be rejected even when correctly signed.
#[test]
fn test_empty_body_rejected() {
    let secret = SecretString::new("my-webhook-secret");
    let signature = compute_signature("my-webhook-secret", b"");

    assert!(!is_authentic_request(b"", Some(&signature), &secret));
}

/// Verification operates on the exact raw bytes: a one-byte change in the
/// body invalidates an otherwise correct signature.
#[test]
fn test_body_mutation_invalidates_signature() {
    let secret = SecretString::new("my-webhook-secret");
    let body = br#"{"data":{"attributes":{"eventType":"TRANSACTION_CREATED"}}}"#;
    let signature = compute_signature("my-webhook-secret", body);

    let mut mutated = body.to_vec();
    mutated[0] = b' ';

    assert!(is_authentic_request(body, Some(&signature), &secret));
    assert!(!is_authentic_request(&mutated, Some(&signature), &secret));
}
