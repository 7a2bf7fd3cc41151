//! Reversible email encryption.
//!
//! AES-256-GCM with a fresh random 96-bit nonce per call. The nonce,
//! ciphertext and authentication tag are carried independently in the
//! stored token (see [`crate::token`]), so a decrypt either reproduces
//! the exact normalized address that was encrypted or fails — tampered
//! or wrong-key tokens never yield partial plaintext.

use crate::address::normalize;
use crate::error::{EmailCryptoError, EmailCryptoResult};
use crate::keys::KeyMaterial;
use crate::token::{EmailToken, TokenV1, NONCE_SIZE, TAG_SIZE};
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use tracing::warn;

/// Encrypts an email address into a storable `v1` token.
///
/// The address is normalized before encryption, so decryption returns
/// the canonical form regardless of how the address was entered. An
/// address that normalizes to the empty string encrypts to the empty
/// token — the same "no email" sentinel [`decrypt`] accepts. Every
/// call draws a fresh nonce from the OS CSPRNG; two encryptions of the
/// same address produce different tokens.
pub fn encrypt(keys: &KeyMaterial, email: &str) -> EmailCryptoResult<String> {
    let normalized = normalize(email);
    if normalized.is_empty() {
        return Ok(String::new());
    }
    let cipher = Aes256Gcm::new(keys.cipher_key().as_bytes().into());

    let mut iv = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut iv);

    // The aead crate appends the 16-byte tag to the ciphertext; the wire
    // format carries them as separate fields.
    let mut combined = cipher
        .encrypt(Nonce::from_slice(&iv), normalized.as_bytes())
        .map_err(|_| EmailCryptoError::Encryption)?;
    let tag_bytes = combined.split_off(combined.len() - TAG_SIZE);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&tag_bytes);

    Ok(EmailToken::V1(TokenV1 {
        iv,
        ciphertext: combined,
        tag,
    })
    .to_string())
}

/// Decrypts a stored token back to the normalized email address.
///
/// An empty (or whitespace-only) token is the "no email" sentinel and
/// returns the empty string rather than an error.
///
/// # Errors
///
/// Returns [`EmailCryptoError::InvalidPayload`] if the token deviates
/// from the wire format, and [`EmailCryptoError::Decryption`] if
/// authentication fails — corruption, tampering and a wrong key are
/// deliberately indistinguishable.
pub fn decrypt(keys: &KeyMaterial, token: &str) -> EmailCryptoResult<String> {
    if token.trim().is_empty() {
        return Ok(String::new());
    }

    let EmailToken::V1(parsed) = EmailToken::parse(token)?;
    let cipher = Aes256Gcm::new(keys.cipher_key().as_bytes().into());

    let mut combined = parsed.ciphertext;
    combined.extend_from_slice(&parsed.tag);

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&parsed.iv), combined.as_ref())
        .map_err(|_| {
            warn!("email token failed authentication");
            EmailCryptoError::Decryption
        })?;

    String::from_utf8(plaintext).map_err(|_| EmailCryptoError::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{CipherKey, HmacSecret};

    fn test_keys() -> KeyMaterial {
        KeyMaterial::new(
            HmacSecret::parse("codec-test-secret").unwrap(),
            CipherKey::parse("0123456789abcdef0123456789abcdef").unwrap(),
        )
    }

    #[test]
    fn round_trip_returns_normalized_address() {
        let keys = test_keys();
        let token = encrypt(&keys, "Alice@Example.COM").unwrap();
        assert_eq!(decrypt(&keys, &token).unwrap(), "alice@example.com");
    }

    #[test]
    fn empty_token_is_no_email_sentinel() {
        let keys = test_keys();
        assert_eq!(decrypt(&keys, "").unwrap(), "");
        assert_eq!(decrypt(&keys, "   ").unwrap(), "");
    }

    #[test]
    fn empty_address_encrypts_to_empty_token() {
        let keys = test_keys();
        for input in ["", "   "] {
            let token = encrypt(&keys, input).unwrap();
            assert_eq!(token, "");
            assert_eq!(decrypt(&keys, &token).unwrap(), "");
        }
    }

    #[test]
    fn encrypting_twice_differs() {
        let keys = test_keys();
        let t1 = encrypt(&keys, "alice@example.com").unwrap();
        let t2 = encrypt(&keys, "alice@example.com").unwrap();
        assert_ne!(t1, t2);
        assert_eq!(decrypt(&keys, &t1).unwrap(), decrypt(&keys, &t2).unwrap());
    }

    #[test]
    fn wrong_key_fails_closed() {
        let keys = test_keys();
        let other = KeyMaterial::new(
            HmacSecret::parse("codec-test-secret").unwrap(),
            CipherKey::parse("fedcba9876543210fedcba9876543210").unwrap(),
        );
        let token = encrypt(&keys, "alice@example.com").unwrap();
        assert!(matches!(
            decrypt(&other, &token),
            Err(EmailCryptoError::Decryption)
        ));
    }
}
