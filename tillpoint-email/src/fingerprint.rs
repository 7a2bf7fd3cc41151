//! Deterministic email fingerprints.
//!
//! A fingerprint is an HMAC-SHA-256 of the normalized address, keyed by
//! the resolved HMAC secret and rendered as lowercase hex. It gives the
//! storage layer a stable, non-reversible column to put a unique index
//! on — exact-match lookups without ever storing the address itself.

use crate::address::normalize;
use crate::keys::KeyMaterial;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a rendered fingerprint: 32 digest bytes as hex.
pub const FINGERPRINT_LEN: usize = 64;

/// Computes the fingerprint of an email address.
///
/// The address is normalized first, so case and surrounding whitespace
/// never affect the result. Total over any input string; the empty
/// string fingerprints deterministically like any other value.
pub fn fingerprint(keys: &KeyMaterial, email: &str) -> String {
    let normalized = normalize(email);
    let mut mac = HmacSha256::new_from_slice(keys.hmac_secret().as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(normalized.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
