//! Password hashing for the admin credential.
//!
//! Argon2id with per-hash random salts. The stored value is the PHC string
//! (`$argon2id$...`), so parameters travel with the hash and can change
//! without invalidating existing rows.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::ApiError;

/// Hashes a plaintext password into a PHC string.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::Hashing)
}

/// Verifies a plaintext password against a stored PHC string.
///
/// An unparseable stored hash counts as a mismatch, not an error; the
/// caller answers with the same generic login failure either way.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("admin123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn test_garbage_hash_is_a_mismatch() {
        assert!(!verify_password("admin123", "not-a-phc-string"));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("admin123").unwrap();
        let b = hash_password("admin123").unwrap();
        assert_ne!(a, b);
    }
}
