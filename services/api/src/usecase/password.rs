//! Password hashing and verification.
//!
//! argon2id with a fresh random salt per hash; digest and salt travel together
//! in one PHC string. Verification goes through the argon2 verifier, which
//! compares in constant time — never through string equality.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::ChitServiceError;

/// Hash a cleartext password into a PHC string.
pub fn hash_password(password: &str) -> Result<String, ChitServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a cleartext password against a stored PHC string.
///
/// An unparseable stored hash verifies as false rather than erroring — a
/// corrupt credential must never authenticate.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_distinct_hashes_for_same_password() {
        let a = hash_password("correct horse battery").unwrap();
        let b = hash_password("correct horse battery").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("correct horse battery", &a));
        assert!(verify_password("correct horse battery", &b));
    }

    #[test]
    fn should_reject_wrong_password() {
        let hash = hash_password("right-password").unwrap();
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn should_reject_corrupt_stored_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn should_store_salt_inside_the_phc_string() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }
}
