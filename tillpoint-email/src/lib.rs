//! Email confidentiality layer for Tillpoint.
//!
//! Email addresses are never stored in plaintext. Two parallel
//! representations are maintained instead:
//!
//! 1. **Fingerprint**: a keyed HMAC-SHA-256 of the normalized address,
//!    rendered as lowercase hex. Deterministic and non-reversible, it is
//!    what the storage layer indexes for uniqueness and exact-match
//!    lookups.
//!
//! 2. **Encrypted token**: the normalized address under AES-256-GCM with
//!    a fresh nonce per encryption, stored as a versioned
//!    `v1:<iv>:<ciphertext>:<tag>` string and decrypted only when
//!    display is authorized.
//!
//! Key material is resolved once — from the environment or explicit
//! configuration — and injected into every operation. Resolution is
//! fail-closed: a missing or malformed secret stops the module rather
//! than falling back to a weak default.
//!
//! All operations are pure, synchronous transforms; `&KeyMaterial` is
//! freely shareable across threads and tasks.

mod address;
mod codec;
mod error;
mod fingerprint;
mod keys;
mod token;

pub use address::{normalize, redact_email, redact_fingerprint, redacted, REDACTED};
pub use codec::{decrypt, encrypt};
pub use error::{EmailCryptoError, EmailCryptoResult};
pub use fingerprint::{fingerprint, FINGERPRINT_LEN};
pub use keys::{
    CipherKey, HmacSecret, KeyMaterial, KeySource, CIPHER_KEY_SIZE, ENV_CIPHER_KEY,
    ENV_HMAC_SECRET, MIN_HMAC_SECRET_SIZE,
};
pub use token::{EmailToken, TokenV1, NONCE_SIZE, TAG_SIZE, VERSION_V1};
