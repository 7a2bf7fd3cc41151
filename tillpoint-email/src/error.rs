//! Error types for the email confidentiality layer.

use thiserror::Error;

/// Result type for email confidentiality operations.
pub type EmailCryptoResult<T> = Result<T, EmailCryptoError>;

/// Errors that can occur while fingerprinting, encrypting or decrypting
/// email addresses.
///
/// None of these are recovered locally. Key problems are fatal to the
/// calling operation (fail-closed, no default key is ever substituted),
/// and a failed decrypt is left to the application to translate into
/// user-visible behavior.
#[derive(Debug, Error)]
pub enum EmailCryptoError {
    /// A required secret is absent or fails size/encoding validation.
    #[error("invalid key configuration: {0}")]
    Configuration(String),

    /// An encrypted email token is malformed (wrong field count, missing
    /// or unknown version tag, empty or undecodable field). Detected
    /// before any key material is touched.
    #[error("invalid encrypted email payload")]
    InvalidPayload,

    /// The AEAD encrypt step failed. Unreachable with a validated key
    /// and a fresh nonce.
    #[error("email encryption failed")]
    Encryption,

    /// Authenticated decryption failed. Tampering, corruption and a wrong
    /// key are deliberately indistinguishable.
    #[error("email decryption failed")]
    Decryption,
}
