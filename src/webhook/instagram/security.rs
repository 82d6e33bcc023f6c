//! Security utilities for Instagram webhook verification
//!
//! Meta signs every webhook payload with HMAC-SHA256 using the app secret and
//! sends the result in the `X-Hub-Signature-256` header as `sha256=<hex>`.
//!
//! # Important Notes
//!
//! - The signature MUST be computed on the raw request body bytes, not parsed JSON
//! - The comparison must be constant-time to prevent timing attacks
//! - Enforcement is skipped when no app secret is configured or no header is sent

use crate::consts;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the expected header value, `sha256=<hex digest>`.
pub fn sign(payload: &[u8], app_secret: &str) -> Option<String> {
    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            logfire::error!(
                "Failed to create HMAC instance: {error}",
                error = e.to_string()
            );
            return None;
        }
    };

    mac.update(payload);
    Some(format!(
        "{}{}",
        consts::SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Verifies the X-Hub-Signature-256 header against the raw request body.
///
/// Returns `true` when `app_secret` or `signature_header` is absent. Otherwise
/// the header must equal `sha256=<hex(HMAC-SHA256(app_secret, payload))>`
/// byte for byte.
pub fn verify_signature(
    payload: &[u8],
    signature_header: Option<&str>,
    app_secret: Option<&str>,
) -> bool {
    let (Some(header), Some(secret)) = (signature_header, app_secret) else {
        return true;
    };

    let Some(expected) = sign(payload, secret) else {
        return false;
    };

    // Constant-time comparison, a length mismatch yields false
    let is_valid: bool = expected.as_bytes().ct_eq(header.as_bytes()).into();

    if !is_valid {
        logfire::warn!("Webhook signature verification failed: signatures do not match");
    }

    is_valid
}
