// --- File: crates/shield_auth/src/password.rs ---
//! Password hashing. Thin wrapper over argon2 so callers never touch the
//! hashing primitives directly.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use shield_common::{internal_error, ShieldError};

/// Hash a plaintext password with a fresh salt.
pub fn hash_password(plain: &str) -> Result<String, ShieldError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| internal_error(format!("Failed to hash password: {}", e)))
}

/// Verify a plaintext password against a stored hash. Any malformed hash
/// counts as a failed verification rather than an error.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify_password("hunter2", "not-a-hash"));
    }
}
