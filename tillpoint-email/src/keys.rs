//! Key material resolution and validation.
//!
//! Two independent secrets back the email confidentiality layer: an HMAC
//! secret for deterministic fingerprints and a 256-bit cipher key for the
//! reversible codec. Both are resolved once, validated up front, and held
//! immutable for the life of the process. Resolution failure is fatal to
//! every operation that would have used the key — there is no default or
//! fallback key.
//!
//! Configured values may be base64-encoded or raw UTF-8. Base64 is tried
//! first and wins when the decoded bytes satisfy the size requirement;
//! otherwise the raw bytes are used. The heuristic is preserved for
//! compatibility with existing deployments (see `KeySource` for the
//! config-file path, which uses the same decoding).

use crate::error::{EmailCryptoError, EmailCryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable holding the fingerprint HMAC secret.
pub const ENV_HMAC_SECRET: &str = "EMAIL_HMAC_SECRET";

/// Environment variable holding the AES-256-GCM cipher key.
pub const ENV_CIPHER_KEY: &str = "EMAIL_CIPHER_KEY";

/// Minimum decoded length for a base64-sourced HMAC secret.
pub const MIN_HMAC_SECRET_SIZE: usize = 16;

/// Exact cipher key length in bytes (AES-256).
pub const CIPHER_KEY_SIZE: usize = 32;

/// Secret key for email fingerprint HMACs. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacSecret(Vec<u8>);

impl HmacSecret {
    /// Parses a configured HMAC secret string.
    ///
    /// Tries base64 first; the decoded bytes are used when they are at
    /// least [`MIN_HMAC_SECRET_SIZE`] long. Anything else falls back to
    /// the raw UTF-8 bytes of the configured value. No upper bound is
    /// enforced.
    pub fn parse(configured: &str) -> EmailCryptoResult<Self> {
        if configured.is_empty() {
            return Err(EmailCryptoError::Configuration(
                "HMAC secret must not be empty".to_string(),
            ));
        }

        if let Ok(decoded) = BASE64.decode(configured) {
            if decoded.len() >= MIN_HMAC_SECRET_SIZE {
                debug!(bytes = decoded.len(), "using base64-decoded HMAC secret");
                return Ok(Self(decoded));
            }
        }

        debug!(bytes = configured.len(), "using raw HMAC secret");
        Ok(Self(configured.as_bytes().to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for HmacSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HmacSecret({} bytes)", self.0.len())
    }
}

/// 256-bit key for the reversible email codec. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey([u8; CIPHER_KEY_SIZE]);

impl CipherKey {
    /// Parses a configured cipher key string.
    ///
    /// Accepts a base64 value decoding to exactly 32 bytes, or a raw
    /// UTF-8 value of exactly 32 bytes. Any other length is rejected —
    /// never truncated or padded.
    pub fn parse(configured: &str) -> EmailCryptoResult<Self> {
        if let Ok(decoded) = BASE64.decode(configured) {
            if decoded.len() == CIPHER_KEY_SIZE {
                let mut bytes = [0u8; CIPHER_KEY_SIZE];
                bytes.copy_from_slice(&decoded);
                debug!("using base64-decoded cipher key");
                return Ok(Self(bytes));
            }
        }

        if configured.len() == CIPHER_KEY_SIZE {
            let mut bytes = [0u8; CIPHER_KEY_SIZE];
            bytes.copy_from_slice(configured.as_bytes());
            debug!("using raw cipher key");
            return Ok(Self(bytes));
        }

        Err(EmailCryptoError::Configuration(
            "key must be 32 bytes, base64 or raw".to_string(),
        ))
    }

    pub fn as_bytes(&self) -> &[u8; CIPHER_KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CipherKey(32 bytes)")
    }
}

/// Encoded key strings as they appear in deployment configuration.
///
/// Lets a deployment feed the two secrets from a config file instead of
/// the process environment while reusing the same decoding heuristic.
#[derive(Clone, Debug, Deserialize)]
pub struct KeySource {
    pub hmac_secret: String,
    pub cipher_key: String,
}

/// Resolved, validated key material for the email confidentiality layer.
///
/// Constructed once and shared by reference; all operations borrow it.
/// Immutable after construction, so `&KeyMaterial` is safe to share
/// across threads and async tasks without locking.
#[derive(Clone, Debug)]
pub struct KeyMaterial {
    hmac_secret: HmacSecret,
    cipher_key: CipherKey,
}

impl KeyMaterial {
    /// Builds key material from already-parsed secrets. Intended for
    /// tests and explicit wiring.
    pub fn new(hmac_secret: HmacSecret, cipher_key: CipherKey) -> Self {
        Self {
            hmac_secret,
            cipher_key,
        }
    }

    /// Resolves both secrets from the process environment.
    ///
    /// Reads [`ENV_HMAC_SECRET`] and [`ENV_CIPHER_KEY`]. An unset or
    /// empty variable is a configuration error.
    pub fn from_env() -> EmailCryptoResult<Self> {
        let hmac = std::env::var(ENV_HMAC_SECRET).map_err(|_| {
            EmailCryptoError::Configuration(format!("{ENV_HMAC_SECRET} is not set"))
        })?;
        let cipher = std::env::var(ENV_CIPHER_KEY).map_err(|_| {
            EmailCryptoError::Configuration(format!("{ENV_CIPHER_KEY} is not set"))
        })?;

        Ok(Self::new(HmacSecret::parse(&hmac)?, CipherKey::parse(&cipher)?))
    }

    /// Builds key material from a deserialized [`KeySource`].
    pub fn from_source(source: &KeySource) -> EmailCryptoResult<Self> {
        Ok(Self::new(
            HmacSecret::parse(&source.hmac_secret)?,
            CipherKey::parse(&source.cipher_key)?,
        ))
    }

    pub fn hmac_secret(&self) -> &HmacSecret {
        &self.hmac_secret
    }

    pub fn cipher_key(&self) -> &CipherKey {
        &self.cipher_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

    #[test]
    fn hmac_secret_prefers_base64_when_long_enough() {
        let raw = [7u8; 24];
        let secret = HmacSecret::parse(&BASE64.encode(raw)).unwrap();
        assert_eq!(secret.as_bytes(), raw);
    }

    #[test]
    fn short_base64_hmac_secret_falls_back_to_raw() {
        // "aGk=" decodes to 2 bytes, below the minimum, so the literal
        // string bytes are used instead.
        let secret = HmacSecret::parse("aGk=").unwrap();
        assert_eq!(secret.as_bytes(), b"aGk=");
    }

    #[test]
    fn non_base64_hmac_secret_uses_raw_bytes() {
        let secret = HmacSecret::parse("not base64 at all!").unwrap();
        assert_eq!(secret.as_bytes(), b"not base64 at all!");
    }

    #[test]
    fn empty_hmac_secret_rejected() {
        assert!(matches!(
            HmacSecret::parse(""),
            Err(EmailCryptoError::Configuration(_))
        ));
    }

    #[test]
    fn cipher_key_accepts_exact_base64() {
        let raw = [3u8; CIPHER_KEY_SIZE];
        let key = CipherKey::parse(&BASE64.encode(raw)).unwrap();
        assert_eq!(key.as_bytes(), &raw);
    }

    #[test]
    fn cipher_key_accepts_exact_raw() {
        let raw = "0123456789abcdef0123456789abcdef";
        let key = CipherKey::parse(raw).unwrap();
        assert_eq!(key.as_bytes(), raw.as_bytes());
    }

    #[test]
    fn cipher_key_rejects_31_and_33_bytes() {
        for len in [31usize, 33] {
            let raw = vec![9u8; len];
            assert!(
                matches!(
                    CipherKey::parse(&BASE64.encode(&raw)),
                    Err(EmailCryptoError::Configuration(_))
                ),
                "base64 of {len} bytes must be rejected"
            );
            let raw_str = "x".repeat(len);
            assert!(
                matches!(
                    CipherKey::parse(&raw_str),
                    Err(EmailCryptoError::Configuration(_))
                ),
                "raw string of {len} bytes must be rejected"
            );
        }
    }

    #[test]
    fn key_source_round_trips_through_serde() {
        let json = r#"{"hmac_secret":"fingerprint-secret-0123456789","cipher_key":"0123456789abcdef0123456789abcdef"}"#;
        let source: KeySource = serde_json::from_str(json).unwrap();
        let keys = KeyMaterial::from_source(&source).unwrap();
        assert_eq!(keys.cipher_key().as_bytes().len(), CIPHER_KEY_SIZE);
    }

    #[test]
    fn debug_output_never_contains_key_bytes() {
        let key = CipherKey::parse("0123456789abcdef0123456789abcdef").unwrap();
        let secret = HmacSecret::parse("a perfectly ordinary secret").unwrap();
        assert!(!format!("{key:?}").contains("0123"));
        assert!(!format!("{secret:?}").contains("ordinary"));
    }
}
