//! Password hashing and verification.
//!
//! Argon2id with per-hash random salt; cost parameters travel inside the
//! PHC string, so they can be raised without invalidating stored hashes.

use anyhow::anyhow;
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

/// Hash a plaintext password. There is no way back: verification re-runs
/// the KDF against the stored digest.
pub fn hash_password(plaintext: &str) -> Result<String, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored digest.
///
/// Malformed digests verify as `false` rather than erroring: a corrupt
/// stored hash must read as a failed login, not a crash. The comparison
/// inside the argon2 crate is constant-time.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
