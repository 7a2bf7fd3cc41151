//! Email normalization and log-safe redaction.

/// Fixed sentinel returned when nothing safe can be shown.
pub const REDACTED: &str = "***";

/// Canonicalizes an email address for fingerprinting and encryption.
///
/// Trims surrounding whitespace and lowercases, so addresses differing
/// only in case or padding map to the same canonical value. Idempotent
/// and total: any string (including the empty string) normalizes.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Redacts a known plaintext address for diagnostic logs.
///
/// Keeps the first character of the local part and the full domain:
/// `john.doe@example.com` becomes `j***@example.com`. Input without a
/// domain part collapses to [`REDACTED`]. Never reversible; never a
/// substitute for the fingerprint or ciphertext in storage or lookups.
pub fn redact_email(plaintext: &str) -> String {
    let normalized = normalize(plaintext);
    let Some((local, domain)) = normalized.split_once('@') else {
        return REDACTED.to_string();
    };
    match (local.chars().next(), domain.is_empty()) {
        (Some(first), false) => format!("{first}{REDACTED}@{domain}"),
        _ => REDACTED.to_string(),
    }
}

/// Redacts a fingerprint to a short, clearly-marked hash excerpt.
pub fn redact_fingerprint(fingerprint_hex: &str) -> String {
    let prefix: String = fingerprint_hex.chars().take(8).collect();
    format!("fp:{prefix}")
}

/// Picks the best available redacted form: plaintext first, then
/// fingerprint, then the fixed sentinel.
pub fn redacted(plaintext: Option<&str>, fingerprint_hex: Option<&str>) -> String {
    match (plaintext, fingerprint_hex) {
        (Some(email), _) => redact_email(email),
        (None, Some(fp)) => redact_fingerprint(fp),
        (None, None) => REDACTED.to_string(),
    }
}
