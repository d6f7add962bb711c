//! Login input schema: normalization and shape checks.

use regex::Regex;

/// Normalize an identity for lookup; identities are case-insensitive.
#[must_use]
pub fn normalize_identity(identity: &str) -> String {
    identity.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
#[must_use]
pub fn valid_identity(identity_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(identity_normalized))
}

/// The gate only requires a non-empty secret; password strength rules apply
/// at registration, which is not this service's concern.
#[must_use]
pub fn valid_secret(secret: &str) -> bool {
    !secret.is_empty()
}
