//! Secret hashing and verification (Argon2id, PHC strings).

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, Error as HashError, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

/// A syntactically valid Argon2id hash that matches no secret. Burned on
/// lookups that miss so an unknown identity costs the same as a wrong secret.
pub(crate) const DUMMY_SECRET_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$cG9yZGVnb2R1bW15c2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Verifies a candidate secret against a stored hash.
///
/// Implementations must be slow and salted (never plain equality) and must
/// report a mismatch as `Ok(false)`; `Err` is reserved for faults such as a
/// malformed stored hash or an unreachable backend.
#[allow(async_fn_in_trait)]
pub trait SecretHasher {
    async fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool>;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Hash a secret into a PHC string with a fresh random salt.
    ///
    /// The gate never calls this; it exists for provisioning tooling and
    /// tests, since registration happens outside this service.
    ///
    /// # Errors
    /// Returns an error if hashing fails.
    pub fn hash(&self, secret: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| anyhow!("failed to hash secret: {err}"))?;
        Ok(hash.to_string())
    }
}

impl SecretHasher for Argon2Hasher {
    async fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|err| anyhow!("invalid stored secret hash: {err}"))?;
        match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(err) => Err(anyhow!("secret verification failed: {err}")),
        }
    }
}
