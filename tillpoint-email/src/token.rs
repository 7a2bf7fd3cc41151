//! Wire format for encrypted email tokens.
//!
//! A stored token is `v1:<base64 iv>:<base64 ciphertext>:<base64 tag>` —
//! colon-delimited, exactly four non-empty fields, literal `v1` first.
//! The version tag is a forward-compatibility discriminator: parsing
//! dispatches on it once, here, and a future `v2` gets its own variant
//! instead of string sniffing at call sites.

use crate::error::{EmailCryptoError, EmailCryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Version tag of the current token format.
pub const VERSION_V1: &str = "v1";

/// AES-GCM nonce length in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// A parsed encrypted email token, one variant per wire version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailToken {
    V1(TokenV1),
}

/// Fields of a `v1` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenV1 {
    pub iv: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_SIZE],
}

impl EmailToken {
    /// Parses a stored token string.
    ///
    /// # Errors
    ///
    /// Returns [`EmailCryptoError::InvalidPayload`] for anything that
    /// deviates from the wire format: wrong field count, an empty field,
    /// an unknown version tag, undecodable base64, or an iv/tag of the
    /// wrong length. All of this is detected without touching key
    /// material.
    pub fn parse(token: &str) -> EmailCryptoResult<Self> {
        let fields: Vec<&str> = token.split(':').collect();
        if fields.len() != 4 || fields.iter().any(|f| f.is_empty()) {
            return Err(EmailCryptoError::InvalidPayload);
        }
        match fields[0] {
            VERSION_V1 => Ok(Self::V1(TokenV1::from_fields(
                fields[1], fields[2], fields[3],
            )?)),
            _ => Err(EmailCryptoError::InvalidPayload),
        }
    }
}

impl TokenV1 {
    fn from_fields(iv_b64: &str, ciphertext_b64: &str, tag_b64: &str) -> EmailCryptoResult<Self> {
        let iv_bytes = BASE64
            .decode(iv_b64)
            .map_err(|_| EmailCryptoError::InvalidPayload)?;
        let iv: [u8; NONCE_SIZE] = iv_bytes
            .try_into()
            .map_err(|_| EmailCryptoError::InvalidPayload)?;

        let ciphertext = BASE64
            .decode(ciphertext_b64)
            .map_err(|_| EmailCryptoError::InvalidPayload)?;

        let tag_bytes = BASE64
            .decode(tag_b64)
            .map_err(|_| EmailCryptoError::InvalidPayload)?;
        let tag: [u8; TAG_SIZE] = tag_bytes
            .try_into()
            .map_err(|_| EmailCryptoError::InvalidPayload)?;

        Ok(Self {
            iv,
            ciphertext,
            tag,
        })
    }
}

impl std::fmt::Display for EmailToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1(t) => write!(
                f,
                "{VERSION_V1}:{}:{}:{}",
                BASE64.encode(t.iv),
                BASE64.encode(&t.ciphertext),
                BASE64.encode(t.tag),
            ),
        }
    }
}
