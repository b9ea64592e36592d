//! Short fingerprint of the session signing key.
//!
//! A truncated SHA-256 fingerprint of the signing key lets operators check
//! which key a running instance picked up without exposing the key material.
//! The fingerprint is logged once at startup.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Hash the key's signing material and keep a short prefix.
///
/// Returns the first 8 bytes of the SHA-256 digest as a 16-character
/// lowercase hex string, enough for visual distinction in logs without
/// being security-sensitive.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.signing());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
